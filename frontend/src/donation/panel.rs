use gloo_timers::callback::Timeout;
use log::info;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::digits::{format_toman, reformat_amount_field};
use super::payment::{PaymentRequest, Processor};
use super::state::{DonationAction, DonationState};
use crate::components::notification::Notifier;

const PHONE_ERROR_TEXT: &str = "شماره موبایل را به شکل ۰۹۱۲۳۴۵۶۷۸۹ وارد کنید.";

#[derive(Properties, PartialEq)]
pub struct DonationPanelProps {
    pub primary_presets: Vec<u64>,
    #[prop_or_default]
    pub extra_presets: Vec<u64>,
    #[prop_or(true)]
    pub phone_gate: bool,
    pub processor: Processor,
}

#[derive(Properties, PartialEq)]
struct PresetRowProps {
    amounts: Vec<u64>,
    highlighted: Option<u64>,
    on_select: Callback<u64>,
}

#[function_component(PresetRow)]
fn preset_row(props: &PresetRowProps) -> Html {
    html! {
        <div class="amount-grid">
            { for props.amounts.iter().map(|&amount| {
                let on_select = props.on_select.clone();
                let selected = props.highlighted == Some(amount);
                html! {
                    <button
                        type="button"
                        class={classes!("amount-option", selected.then(|| "selected"))}
                        data-amount={amount.to_string()}
                        aria-pressed={selected.to_string()}
                        onclick={Callback::from(move |_| on_select.emit(amount))}
                    >
                        <span class="amount-value">{ format_toman(amount) }</span>
                    </button>
                }
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PhoneModalProps {
    open: bool,
    value: String,
    show_error: bool,
    input_ref: NodeRef,
    on_input: Callback<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
}

#[function_component(PhoneModal)]
fn phone_modal(props: &PhoneModalProps) -> Html {
    let oninput = {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit(input.value());
        })
    };
    let onkeydown = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                on_confirm.emit(());
            }
        })
    };
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let on_cancel = props.on_cancel.reform(|_: MouseEvent| ());

    html! {
        <div
            class={classes!("phone-modal", (!props.open).then(|| "hidden"))}
            role="dialog"
            aria-modal="true"
            aria-hidden={(!props.open).to_string()}
        >
            <div class="phone-modal-card">
                <h3>{"شماره موبایل خود را وارد کنید"}</h3>
                <p class="phone-hint">{"رسید هدیه و خبر رسیدن زائر برایتان پیامک می‌شود."}</p>
                <input
                    ref={props.input_ref.clone()}
                    type="tel"
                    inputmode="numeric"
                    dir="ltr"
                    class="phone-input"
                    placeholder="09xxxxxxxxx"
                    value={props.value.clone()}
                    {oninput}
                    {onkeydown}
                />
                <p class={classes!("phone-error", (!props.show_error).then(|| "hidden"))} role="alert">
                    { PHONE_ERROR_TEXT }
                </p>
                <div class="phone-actions">
                    <button type="button" class="confirm-phone" onclick={on_confirm}>{"تأیید و پرداخت"}</button>
                    <button type="button" class="cancel-phone" onclick={on_cancel}>{"انصراف"}</button>
                </div>
            </div>
        </div>
    }
}

#[function_component(DonationPanel)]
pub fn donation_panel(props: &DonationPanelProps) -> Html {
    let state = {
        let presets: Vec<u64> = props
            .primary_presets
            .iter()
            .chain(props.extra_presets.iter())
            .copied()
            .collect();
        let phone_gate = props.phone_gate;
        use_reducer(move || DonationState::new(presets, phone_gate))
    };
    let more_open = use_state(|| false);
    let custom_open = use_state(|| false);
    let phone_ref = use_node_ref();
    let notifier = use_context::<Notifier>();

    // Focus once the modal is actually visible
    {
        let phone_ref = phone_ref.clone();
        use_effect_with_deps(
            move |open: &bool| {
                let timeout = open.then(|| {
                    Timeout::new(0, move || {
                        if let Some(input) = phone_ref.cast::<HtmlInputElement>() {
                            let _ = input.focus();
                        }
                    })
                });
                move || drop(timeout)
            },
            state.modal_open(),
        );
    }

    // Hand a request to the processor whenever the gate lets one through
    {
        let dispatcher = state.dispatcher();
        let processor = props.processor.clone();
        let notifier = notifier.clone();
        use_effect_with_deps(
            move |request: &Option<PaymentRequest>| {
                if let Some(request) = request.clone() {
                    spawn_local(async move {
                        match processor.process(request).await {
                            Ok(receipt) => {
                                info!("Payment of {} toman completed", receipt.amount);
                                if let Some(notifier) = &notifier {
                                    notifier.success(format!(
                                        "پرداخت {} با موفقیت انجام شد!",
                                        format_toman(receipt.amount)
                                    ));
                                }
                            }
                            Err(err) => {
                                gloo_console::error!("Payment failed:", err.to_string());
                                if let Some(notifier) = &notifier {
                                    notifier.error("پرداخت انجام نشد. لطفاً دوباره تلاش کنید.");
                                }
                            }
                        }
                        dispatcher.dispatch(DonationAction::PaymentSettled);
                    });
                }
                || ()
            },
            state.processing().cloned(),
        );
    }

    let on_select = {
        let state = state.clone();
        Callback::from(move |amount: u64| state.dispatch(DonationAction::SelectPreset(amount)))
    };

    let on_custom_input = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let raw = input.value();
            // Write back right away; an unchanged vdom value wouldn't touch the field
            input.set_value(&reformat_amount_field(&raw));
            state.dispatch(DonationAction::TypeCustomAmount(raw));
        })
    };

    let on_upsell = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(DonationAction::AcceptUpsell))
    };

    let on_pay = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(DonationAction::RequestPayment))
    };

    let on_phone_input = {
        let state = state.clone();
        Callback::from(move |value: String| state.dispatch(DonationAction::PhoneInput(value)))
    };
    let on_confirm = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(DonationAction::ConfirmPhone))
    };
    let on_cancel = {
        let state = state.clone();
        Callback::from(move |_: ()| state.dispatch(DonationAction::CancelPhone))
    };

    let toggle_more = {
        let more_open = more_open.clone();
        Callback::from(move |_: MouseEvent| more_open.set(!*more_open))
    };
    let toggle_custom = {
        let custom_open = custom_open.clone();
        Callback::from(move |_: MouseEvent| custom_open.set(!*custom_open))
    };

    html! {
        <section class="payment-module" id="donate">
            <h2>{"هدیه‌ات را انتخاب کن"}</h2>
            <PresetRow
                amounts={props.primary_presets.clone()}
                highlighted={state.highlighted()}
                on_select={on_select.clone()}
            />
            {
                if !props.extra_presets.is_empty() {
                    html! {
                        <>
                            <button
                                type="button"
                                class="collapsible-toggle"
                                aria-expanded={(*more_open).to_string()}
                                onclick={toggle_more}
                            >
                                {"مبالغ بیشتر"}
                            </button>
                            <div class={classes!("collapsible", (*more_open).then(|| "open"))}>
                                <PresetRow
                                    amounts={props.extra_presets.clone()}
                                    highlighted={state.highlighted()}
                                    on_select={on_select}
                                />
                            </div>
                        </>
                    }
                } else {
                    html! {}
                }
            }
            <button
                type="button"
                class="collapsible-toggle"
                aria-expanded={(*custom_open).to_string()}
                onclick={toggle_custom}
            >
                {"مبلغ دلخواه"}
            </button>
            <div class={classes!("collapsible", (*custom_open).then(|| "open"))}>
                <input
                    type="text"
                    inputmode="numeric"
                    class="custom-amount"
                    placeholder="مبلغ به تومان"
                    value={state.custom_input().to_string()}
                    oninput={on_custom_input}
                />
            </div>
            {
                if state.upsell_visible() {
                    html! {
                        <div class="upsell-message fade-in">
                            <p class="upsell-text">{ state.upsell_text() }</p>
                            <button type="button" class="upsell-button" onclick={on_upsell}>
                                { state.upsell_button_label() }
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            <button
                type="button"
                class="payment-button"
                disabled={!state.cta_enabled()}
                onclick={on_pay}
            >
                <span class="payment-text">{ state.cta_label() }</span>
            </button>
            <PhoneModal
                open={state.modal_open()}
                value={state.phone_input().to_string()}
                show_error={state.phone_error().is_some()}
                input_ref={phone_ref}
                on_input={on_phone_input}
                on_confirm={on_confirm}
                on_cancel={on_cancel}
            />
            <style>
                {r#"
                    .payment-module {
                        max-width: 560px;
                        margin: 0 auto;
                        padding: 2rem 1rem;
                    }
                    .amount-grid {
                        display: grid;
                        grid-template-columns: repeat(2, 1fr);
                        gap: 0.75rem;
                        margin-bottom: 1rem;
                    }
                    .amount-option {
                        padding: 1rem;
                        border-radius: 12px;
                        border: 2px solid #e5e7eb;
                        background: white;
                        cursor: pointer;
                    }
                    .amount-option.selected {
                        border-color: #16a34a;
                        background: #f0fdf4;
                    }
                    .collapsible {
                        max-height: 0;
                        overflow: hidden;
                        transition: max-height 0.3s ease;
                    }
                    .collapsible.open {
                        max-height: 400px;
                    }
                    .upsell-message {
                        margin: 1rem 0;
                        padding: 1rem;
                        border-radius: 12px;
                        background: #fffbeb;
                    }
                    .payment-button {
                        width: 100%;
                        padding: 1rem;
                        border-radius: 12px;
                        border: none;
                        background: #16a34a;
                        color: white;
                        font-size: 1.1rem;
                    }
                    .payment-button:disabled {
                        background: #9ca3af;
                        cursor: not-allowed;
                    }
                    .phone-modal {
                        position: fixed;
                        inset: 0;
                        background: rgba(0, 0, 0, 0.5);
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        z-index: 900;
                    }
                    .phone-modal-card {
                        background: white;
                        border-radius: 16px;
                        padding: 1.5rem;
                        width: min(90vw, 380px);
                    }
                    .hidden {
                        display: none !important;
                    }
                    .phone-error {
                        color: #dc2626;
                    }
                "#}
            </style>
        </section>
    }
}
