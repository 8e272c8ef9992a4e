use std::rc::Rc;

use yew::Reducible;

use super::digits::{format_grouped, format_toman, parse_amount, to_persian_digits};
use super::payment::PaymentRequest;
use super::phone::{PhoneError, PhoneNumber};
use crate::config::{
    UPSELL_HIDDEN_FROM, UPSELL_LARGE_FROM, UPSELL_LARGE_INCREMENT, UPSELL_SMALL_INCREMENT,
};

pub const CHOOSE_AMOUNT_LABEL: &str = "مبلغی را انتخاب کنید";
pub const PROCESSING_LABEL: &str = "در حال پردازش...";

pub fn upsell_increment_for(amount: u64) -> u64 {
    if amount >= UPSELL_LARGE_FROM {
        UPSELL_LARGE_INCREMENT
    } else {
        UPSELL_SMALL_INCREMENT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentPhase {
    Idle,
    PhoneModalOpen { error: Option<PhoneError> },
    Processing(PaymentRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DonationAction {
    SelectPreset(u64),
    TypeCustomAmount(String),
    AcceptUpsell,
    RequestPayment,
    PhoneInput(String),
    ConfirmPhone,
    CancelPhone,
    PaymentSettled,
}

/// Everything the donation panel knows: the chosen amount, the upsell offer
/// and where the payment gate stands. Components never mutate it directly;
/// they dispatch a [`DonationAction`].
#[derive(Debug, Clone, PartialEq)]
pub struct DonationState {
    presets: Vec<u64>,
    phone_gate: bool,
    selected: Option<u64>,
    highlighted: Option<u64>,
    custom_input: String,
    upsell_open: bool,
    phone_input: String,
    phase: PaymentPhase,
}

impl DonationState {
    pub fn new(presets: Vec<u64>, phone_gate: bool) -> Self {
        Self {
            presets,
            phone_gate,
            selected: None,
            highlighted: None,
            custom_input: String::new(),
            upsell_open: false,
            phone_input: String::new(),
            phase: PaymentPhase::Idle,
        }
    }

    #[cfg(test)]
    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub fn highlighted(&self) -> Option<u64> {
        self.highlighted
    }

    pub fn custom_input(&self) -> &str {
        &self.custom_input
    }

    pub fn phone_input(&self) -> &str {
        &self.phone_input
    }

    #[cfg(test)]
    pub fn phase(&self) -> &PaymentPhase {
        &self.phase
    }

    pub fn upsell_increment(&self) -> u64 {
        self.selected
            .map(upsell_increment_for)
            .unwrap_or(UPSELL_SMALL_INCREMENT)
    }

    pub fn upsell_visible(&self) -> bool {
        self.upsell_open && self.selected.is_some()
    }

    pub fn modal_open(&self) -> bool {
        matches!(self.phase, PaymentPhase::PhoneModalOpen { .. })
    }

    pub fn phone_error(&self) -> Option<&PhoneError> {
        match &self.phase {
            PaymentPhase::PhoneModalOpen { error } => error.as_ref(),
            _ => None,
        }
    }

    pub fn processing(&self) -> Option<&PaymentRequest> {
        match &self.phase {
            PaymentPhase::Processing(request) => Some(request),
            _ => None,
        }
    }

    pub fn cta_enabled(&self) -> bool {
        self.selected.is_some() && self.processing().is_none()
    }

    pub fn cta_label(&self) -> String {
        if self.processing().is_some() {
            return PROCESSING_LABEL.to_string();
        }
        match self.selected {
            Some(amount) => format!("هدیه‌ام را برای زائر ارسال می‌کنم ({})", format_toman(amount)),
            None => CHOOSE_AMOUNT_LABEL.to_string(),
        }
    }

    fn increment_thousands(&self) -> String {
        to_persian_digits(&(self.upsell_increment() / 1000).to_string())
    }

    pub fn upsell_text(&self) -> String {
        format!(
            "با افزودن فقط {} هزار تومان دیگر، هزینه پذیرایی بین راه او را هم تقبل می‌کنی؟",
            self.increment_thousands()
        )
    }

    pub fn upsell_button_label(&self) -> String {
        format!("بله، {} هزار تومان اضافه کن", self.increment_thousands())
    }

    fn set_amount(&mut self, amount: u64) {
        self.selected = Some(amount);
        self.upsell_open = amount < UPSELL_HIDDEN_FROM;
    }

    pub fn select_preset(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        self.set_amount(amount);
        self.highlighted = self.presets.contains(&amount).then_some(amount);
    }

    /// Parses the custom field and rewrites it in grouped Persian digits.
    /// Invalid input only clears the selection when no preset is highlighted;
    /// a highlighted preset keeps its amount, increment and upsell untouched.
    pub fn type_custom_amount(&mut self, raw: &str) {
        match parse_amount(raw) {
            Some(amount) => {
                self.set_amount(amount);
                self.highlighted = None;
                self.custom_input = format_grouped(amount);
            }
            None => {
                if self.highlighted.is_none() {
                    self.selected = None;
                    self.upsell_open = false;
                }
                self.custom_input.clear();
            }
        }
    }

    pub fn accept_upsell(&mut self) {
        let Some(amount) = self.selected else {
            return;
        };
        let total = amount.saturating_add(self.upsell_increment());
        self.selected = Some(total);
        self.upsell_open = false;
        self.highlighted = self.presets.contains(&total).then_some(total);
    }

    pub fn request_payment(&mut self) {
        let Some(amount) = self.selected else {
            return;
        };
        if self.processing().is_some() {
            return;
        }
        if self.phone_gate {
            self.phone_input.clear();
            self.phase = PaymentPhase::PhoneModalOpen { error: None };
        } else {
            self.phase = PaymentPhase::Processing(PaymentRequest { amount, phone: None });
        }
    }

    pub fn set_phone_input(&mut self, raw: &str) {
        self.phone_input = raw.to_string();
    }

    pub fn confirm_phone(&mut self) {
        if !self.modal_open() {
            return;
        }
        match PhoneNumber::parse(&self.phone_input) {
            Err(err) => {
                self.phase = PaymentPhase::PhoneModalOpen { error: Some(err) };
            }
            Ok(phone) => {
                self.phase = match self.selected {
                    Some(amount) => PaymentPhase::Processing(PaymentRequest {
                        amount,
                        phone: Some(phone),
                    }),
                    None => PaymentPhase::Idle,
                };
            }
        }
    }

    pub fn cancel_phone(&mut self) {
        if self.modal_open() {
            self.phase = PaymentPhase::Idle;
        }
    }

    pub fn settle_payment(&mut self) {
        if self.processing().is_some() {
            self.phase = PaymentPhase::Idle;
        }
    }
}

impl Reducible for DonationState {
    type Action = DonationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DonationAction::SelectPreset(amount) => next.select_preset(amount),
            DonationAction::TypeCustomAmount(raw) => next.type_custom_amount(&raw),
            DonationAction::AcceptUpsell => next.accept_upsell(),
            DonationAction::RequestPayment => next.request_payment(),
            DonationAction::PhoneInput(raw) => next.set_phone_input(&raw),
            DonationAction::ConfirmPhone => next.confirm_phone(),
            DonationAction::CancelPhone => next.cancel_phone(),
            DonationAction::PaymentSettled => next.settle_payment(),
        }
        next.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> DonationState {
        DonationState::new(
            vec![300_000, 500_000, 600_000, 1_000_000, 2_000_000, 9_000_000],
            true,
        )
    }

    #[test]
    fn preset_below_a_million_uses_small_increment() {
        let mut s = state();
        s.select_preset(500_000);
        assert_eq!(s.selected(), Some(500_000));
        assert_eq!(s.upsell_increment(), 100_000);
        assert!(s.upsell_visible());
        assert!(s.upsell_text().contains("۱۰۰ هزار"));
        assert_eq!(s.upsell_button_label(), "بله، ۱۰۰ هزار تومان اضافه کن");
        assert_eq!(s.highlighted(), Some(500_000));
    }

    #[test]
    fn preset_from_a_million_uses_large_increment() {
        let mut s = state();
        s.select_preset(1_000_000);
        assert_eq!(s.upsell_increment(), 250_000);
        s.select_preset(2_000_000);
        assert_eq!(s.upsell_increment(), 250_000);
        assert!(s.upsell_text().contains("۲۵۰ هزار"));
        s.select_preset(300_000);
        assert_eq!(s.upsell_increment(), 100_000);
    }

    #[test]
    fn custom_amount_switches_increment_at_one_million() {
        let mut s = state();
        s.type_custom_amount("999999");
        assert_eq!(s.upsell_increment(), 100_000);
        s.type_custom_amount("1000000");
        assert_eq!(s.upsell_increment(), 250_000);
        assert!(s.upsell_text().contains("۲۵۰ هزار"));
        s.type_custom_amount("999999");
        assert_eq!(s.upsell_increment(), 100_000);
        assert_eq!(s.upsell_button_label(), "بله، ۱۰۰ هزار تومان اضافه کن");
    }

    #[test]
    fn upsell_hidden_from_nine_million() {
        let mut s = state();
        s.select_preset(9_000_000);
        assert!(!s.upsell_visible());
        s.type_custom_amount("12000000");
        assert!(!s.upsell_visible());
        s.type_custom_amount("8999999");
        assert!(s.upsell_visible());
    }

    #[test]
    fn accepting_upsell_adds_increment_and_hides_offer() {
        let mut s = state();
        s.select_preset(500_000);
        s.accept_upsell();
        assert_eq!(s.selected(), Some(600_000));
        assert!(!s.upsell_visible());
        assert_eq!(s.highlighted(), Some(600_000));
    }

    #[test]
    fn accepting_upsell_uses_increment_in_effect_at_acceptance() {
        let mut s = state();
        s.select_preset(2_000_000);
        s.accept_upsell();
        assert_eq!(s.selected(), Some(2_250_000));
        assert_eq!(s.highlighted(), None);
    }

    #[test]
    fn accepting_upsell_without_amount_is_noop() {
        let mut s = state();
        s.accept_upsell();
        assert_eq!(s.selected(), None);
        assert!(!s.upsell_visible());
    }

    #[test]
    fn custom_amount_reformats_and_clears_preset() {
        let mut s = state();
        s.select_preset(500_000);
        s.type_custom_amount("1500000");
        assert_eq!(s.selected(), Some(1_500_000));
        assert_eq!(s.upsell_increment(), 250_000);
        assert_eq!(s.custom_input(), "۱٬۵۰۰٬۰۰۰");
        assert_eq!(s.highlighted(), None);
        assert!(s.upsell_visible());
    }

    #[test]
    fn custom_amount_accepts_reformatted_persian_input() {
        let mut s = state();
        s.type_custom_amount("۱٬۵۰۰٬۰۰۰5");
        assert_eq!(s.selected(), Some(15_000_005));
    }

    #[test]
    fn clearing_custom_field_without_preset_clears_selection() {
        let mut s = state();
        s.type_custom_amount("700000");
        s.type_custom_amount("");
        assert_eq!(s.selected(), None);
        assert!(!s.upsell_visible());
        assert_eq!(s.custom_input(), "");
        assert_eq!(s.cta_label(), CHOOSE_AMOUNT_LABEL);
        assert!(!s.cta_enabled());
    }

    #[test]
    fn invalid_custom_input_keeps_highlighted_preset() {
        let mut s = state();
        s.select_preset(2_000_000);
        s.type_custom_amount("abc");
        assert_eq!(s.selected(), Some(2_000_000));
        assert_eq!(s.highlighted(), Some(2_000_000));
        assert_eq!(s.upsell_increment(), 250_000);
        assert!(s.upsell_visible());
        assert_eq!(s.custom_input(), "");
    }

    #[test]
    fn preset_is_not_restored_after_custom_field_cleared() {
        let mut s = state();
        s.select_preset(500_000);
        s.type_custom_amount("800000");
        s.type_custom_amount("");
        assert_eq!(s.selected(), None);
        assert_eq!(s.highlighted(), None);
    }

    #[test]
    fn cta_label_shows_formatted_amount() {
        let mut s = state();
        s.select_preset(500_000);
        assert_eq!(s.cta_label(), "هدیه‌ام را برای زائر ارسال می‌کنم (۵۰۰٬۰۰۰ تومان)");
        assert!(s.cta_enabled());
    }

    #[test]
    fn payment_request_without_amount_is_noop() {
        let mut s = state();
        s.request_payment();
        assert_eq!(s.phase(), &PaymentPhase::Idle);
    }

    #[test]
    fn opening_modal_clears_previous_input_and_error() {
        let mut s = state();
        s.select_preset(500_000);
        s.request_payment();
        s.set_phone_input("123");
        s.confirm_phone();
        assert!(s.phone_error().is_some());
        s.cancel_phone();
        s.request_payment();
        assert!(s.modal_open());
        assert_eq!(s.phone_input(), "");
        assert_eq!(s.phone_error(), None);
    }

    #[test]
    fn invalid_phone_keeps_modal_open() {
        let mut s = state();
        s.select_preset(500_000);
        s.request_payment();
        for bad in ["0912345678", "9123456789", "09a23456789"] {
            s.set_phone_input(bad);
            s.confirm_phone();
            assert!(s.modal_open(), "{bad} should keep the modal open");
            assert!(s.phone_error().is_some());
        }
    }

    #[test]
    fn valid_phone_moves_to_processing_then_back() {
        let mut s = state();
        s.select_preset(500_000);
        s.request_payment();
        s.set_phone_input("09123456789");
        s.confirm_phone();
        assert!(!s.modal_open());
        let request = s.processing().cloned().unwrap();
        assert_eq!(request.amount, 500_000);
        assert_eq!(request.phone.unwrap().as_str(), "09123456789");
        assert!(!s.cta_enabled());
        assert_eq!(s.cta_label(), PROCESSING_LABEL);

        s.settle_payment();
        assert_eq!(s.phase(), &PaymentPhase::Idle);
        assert!(s.cta_enabled());
        assert_eq!(s.selected(), Some(500_000));
    }

    #[test]
    fn cancel_preserves_selection() {
        let mut s = state();
        s.select_preset(1_000_000);
        s.request_payment();
        s.cancel_phone();
        assert_eq!(s.phase(), &PaymentPhase::Idle);
        assert_eq!(s.selected(), Some(1_000_000));
        assert_eq!(s.highlighted(), Some(1_000_000));
    }

    #[test]
    fn without_phone_gate_payment_starts_immediately() {
        let mut s = DonationState::new(vec![500_000], false);
        s.select_preset(500_000);
        s.request_payment();
        assert_eq!(
            s.processing(),
            Some(&PaymentRequest {
                amount: 500_000,
                phone: None
            })
        );
    }

    #[test]
    fn repeated_request_while_processing_is_ignored() {
        let mut s = DonationState::new(vec![500_000], false);
        s.select_preset(500_000);
        s.request_payment();
        s.select_preset(300_000);
        s.request_payment();
        assert_eq!(s.processing().map(|r| r.amount), Some(500_000));
    }

    #[test]
    fn reducer_dispatches_actions() {
        let s = Rc::new(state());
        let s = s.reduce(DonationAction::SelectPreset(500_000));
        let s = s.reduce(DonationAction::AcceptUpsell);
        let s = s.reduce(DonationAction::RequestPayment);
        let s = s.reduce(DonationAction::PhoneInput("۰۹۱۲۳۴۵۶۷۸۹".to_string()));
        let s = s.reduce(DonationAction::ConfirmPhone);
        assert_eq!(s.processing().map(|r| r.amount), Some(600_000));
        let s = s.reduce(DonationAction::PaymentSettled);
        assert_eq!(s.phase(), &PaymentPhase::Idle);
    }
}
