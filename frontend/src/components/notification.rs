use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::ErrorEvent;
use yew::prelude::*;
use yew_hooks::use_event_with_window;

use crate::config::{TOAST_EXIT_MS, TOAST_VISIBLE_MS};

pub const GENERIC_ERROR_MESSAGE: &str = "خطایی رخ داده است. لطفاً صفحه را رفرش کنید.";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Info => "notification-info",
            NoticeKind::Success => "notification-success",
            NoticeKind::Error => "notification-error",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Notice {
    pub id: u32,
    pub kind: NoticeKind,
    pub message: String,
}

pub enum NoticeAction {
    Push(NoticeKind, String),
    Dismiss(u32),
}

#[derive(Default, PartialEq, Debug)]
pub struct NoticeQueue {
    next_id: u32,
    notices: Vec<Notice>,
}

impl NoticeQueue {
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl Reducible for NoticeQueue {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut notices = self.notices.clone();
        let mut next_id = self.next_id;
        match action {
            NoticeAction::Push(kind, message) => {
                notices.push(Notice { id: next_id, kind, message });
                next_id = next_id.wrapping_add(1);
            }
            NoticeAction::Dismiss(id) => notices.retain(|n| n.id != id),
        }
        Rc::new(Self { next_id, notices })
    }
}

/// Context handle for raising a toast from anywhere below [`NotificationHost`].
#[derive(Clone, PartialEq)]
pub struct Notifier(Callback<(NoticeKind, String)>);

impl Notifier {
    pub fn notify(&self, kind: NoticeKind, message: impl Into<String>) {
        self.0.emit((kind, message.into()));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(NoticeKind::Info, message);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(NoticeKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(NoticeKind::Error, message);
    }
}

#[derive(Properties, PartialEq)]
struct ToastProps {
    notice: Notice,
    on_dismiss: Callback<u32>,
}

#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
    let leaving = use_state(|| false);

    {
        let leaving_setter = leaving.setter();
        let on_dismiss = props.on_dismiss.clone();
        let id = props.notice.id;
        use_effect_with_deps(
            move |leaving: &bool| {
                let timeout = if !*leaving {
                    Timeout::new(TOAST_VISIBLE_MS, move || leaving_setter.set(true))
                } else {
                    // Let the slide-out animation finish before removing
                    Timeout::new(TOAST_EXIT_MS, move || on_dismiss.emit(id))
                };
                move || drop(timeout)
            },
            *leaving,
        );
    }

    html! {
        <div
            class={classes!("notification", props.notice.kind.class(), (*leaving).then(|| "leaving"))}
            role="status"
        >
            { props.notice.message.clone() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationHostProps {
    #[prop_or_default]
    pub children: Children,
}

/// Owns the toast queue, exposes a [`Notifier`] to its children and turns
/// uncaught script errors into a generic error toast.
#[function_component(NotificationHost)]
pub fn notification_host(props: &NotificationHostProps) -> Html {
    let queue = use_reducer(NoticeQueue::default);

    let notifier = {
        let queue = queue.clone();
        Notifier(Callback::from(move |(kind, message): (NoticeKind, String)| {
            queue.dispatch(NoticeAction::Push(kind, message));
        }))
    };

    {
        let notifier = notifier.clone();
        use_event_with_window("error", move |e: ErrorEvent| {
            gloo_console::error!("Uncaught error:", e.message());
            notifier.error(GENERIC_ERROR_MESSAGE);
        });
    }

    let on_dismiss = {
        let queue = queue.clone();
        Callback::from(move |id: u32| queue.dispatch(NoticeAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<Notifier> context={notifier}>
            { for props.children.iter() }
            <div class="notification-stack">
                { for queue.notices().iter().map(|notice| html! {
                    <Toast key={notice.id} notice={notice.clone()} on_dismiss={on_dismiss.clone()} />
                }) }
            </div>
            <style>
                {r#"
                    .notification-stack {
                        position: fixed;
                        top: 20px;
                        right: 20px;
                        display: flex;
                        flex-direction: column;
                        gap: 0.5rem;
                        z-index: 1000;
                    }
                    .notification {
                        color: white;
                        padding: 1rem 1.5rem;
                        border-radius: 0.5rem;
                        box-shadow: 0 10px 15px rgba(0, 0, 0, 0.1);
                        animation: slideInRight 0.3s ease;
                    }
                    .notification.leaving {
                        animation: slideOutRight 0.3s ease forwards;
                    }
                    .notification-info { background-color: #3b82f6; }
                    .notification-success { background-color: #16a34a; }
                    .notification-error { background-color: #dc2626; }
                    @keyframes slideInRight {
                        from { transform: translateX(100%); opacity: 0; }
                        to { transform: translateX(0); opacity: 1; }
                    }
                    @keyframes slideOutRight {
                        from { transform: translateX(0); opacity: 1; }
                        to { transform: translateX(100%); opacity: 0; }
                    }
                "#}
            </style>
        </ContextProvider<Notifier>>
    }
}
