use std::rc::Rc;

use futures::future::LocalBoxFuture;
use gloo_timers::future::TimeoutFuture;
use log::info;
use thiserror::Error;

use super::phone::PhoneNumber;

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    pub amount: u64,
    /// `None` when the phone gate is switched off.
    pub phone: Option<PhoneNumber>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub amount: u64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),
}

/// The seam a real payment integration plugs into. The donation panel only
/// sees this trait, so swapping the simulation out doesn't touch the state
/// machine.
pub trait PaymentProcessor {
    fn process(
        &self,
        request: PaymentRequest,
    ) -> LocalBoxFuture<'static, Result<PaymentReceipt, PaymentError>>;
}

/// Stand-in that waits a fixed delay and succeeds for any positive amount.
/// No request leaves the browser.
pub struct SimulatedPayment {
    delay_ms: u32,
}

impl SimulatedPayment {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms }
    }
}

impl PaymentProcessor for SimulatedPayment {
    fn process(
        &self,
        request: PaymentRequest,
    ) -> LocalBoxFuture<'static, Result<PaymentReceipt, PaymentError>> {
        let delay_ms = self.delay_ms;
        Box::pin(async move {
            if request.amount == 0 {
                return Err(PaymentError::Declined("amount must be positive".into()));
            }
            info!(
                "Simulating payment of {} toman (SMS receipt: {})",
                request.amount,
                request.phone.is_some()
            );
            TimeoutFuture::new(delay_ms).await;
            Ok(PaymentReceipt {
                amount: request.amount,
            })
        })
    }
}

/// Shared handle so a processor can travel through component props.
#[derive(Clone)]
pub struct Processor(Rc<dyn PaymentProcessor>);

impl Processor {
    pub fn new(inner: impl PaymentProcessor + 'static) -> Self {
        Self(Rc::new(inner))
    }

    pub fn simulated(delay_ms: u32) -> Self {
        Self::new(SimulatedPayment::new(delay_ms))
    }

    pub fn process(
        &self,
        request: PaymentRequest,
    ) -> LocalBoxFuture<'static, Result<PaymentReceipt, PaymentError>> {
        self.0.process(request)
    }
}

impl PartialEq for Processor {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
