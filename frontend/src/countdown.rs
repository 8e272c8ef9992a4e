use chrono::{DateTime, Duration, Utc};
use log::info;
use yew::prelude::*;
use yew_hooks::use_interval;

use crate::components::notification::Notifier;
use crate::config::{COUNTDOWN_DAYS, COUNTDOWN_HOURS, COUNTDOWN_MINUTES};

const TICK_MS: u32 = 1_000;

pub fn countdown_target(start: DateTime<Utc>) -> DateTime<Utc> {
    start
        + Duration::days(COUNTDOWN_DAYS)
        + Duration::hours(COUNTDOWN_HOURS)
        + Duration::minutes(COUNTDOWN_MINUTES)
}

/// Time left before the target, split for display. Hours, minutes and
/// seconds are already reduced modulo their natural period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Remaining {
    /// `None` once the target has been reached; the countdown never goes
    /// negative.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let millis = (target - now).num_milliseconds();
        if millis <= 0 {
            return None;
        }
        let secs = millis / 1000;
        Some(Self {
            days: secs / 86_400,
            hours: (secs / 3_600) % 24,
            minutes: (secs / 60) % 60,
            seconds: secs % 60,
        })
    }

    pub fn fields(&self) -> [String; 4] {
        [self.days, self.hours, self.minutes, self.seconds].map(|v| format!("{:02}", v))
    }
}

#[function_component(Countdown)]
pub fn countdown() -> Html {
    let notifier = use_context::<Notifier>();
    let target = use_state(|| countdown_target(Utc::now()));
    let now = use_state(Utc::now);
    let remaining = Remaining::until(*target, *now);
    let finished = remaining.is_none();

    {
        let now = now.clone();
        // A zero period cancels the interval, so a finished countdown stops ticking
        use_interval(move || now.set(Utc::now()), if finished { 0 } else { TICK_MS });
    }

    use_effect_with_deps(
        move |finished: &bool| {
            if *finished {
                info!("Countdown reached its target");
                if let Some(notifier) = notifier {
                    notifier.info("مهلت ثبت‌نام این کاروان به پایان رسید");
                }
            }
            || ()
        },
        finished,
    );

    let [days, hours, minutes, seconds] = remaining.unwrap_or_default().fields();
    let unit = |value: String, label: &'static str| {
        html! {
            <div class="countdown-unit">
                <span class="countdown-value">{ value }</span>
                <span class="countdown-label">{ label }</span>
            </div>
        }
    };

    html! {
        <div class="countdown" aria-live="off">
            { unit(days, "روز") }
            { unit(hours, "ساعت") }
            { unit(minutes, "دقیقه") }
            { unit(seconds, "ثانیه") }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn target_is_two_days_three_hours_twenty_minutes_out() {
        let start = at(0);
        let target = countdown_target(start);
        assert_eq!((target - start).num_seconds(), 2 * 86_400 + 3 * 3_600 + 20 * 60);
    }

    #[test]
    fn fresh_countdown_shows_full_offset() {
        let start = at(0);
        let remaining = Remaining::until(countdown_target(start), start).unwrap();
        assert_eq!(remaining.fields(), ["02", "03", "20", "00"].map(String::from));
    }

    #[test]
    fn components_wrap_at_their_period() {
        let target = at(90_061); // 1d 1h 1m 1s
        let remaining = Remaining::until(target, at(0)).unwrap();
        assert_eq!(
            remaining,
            Remaining {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
    }

    #[test]
    fn reaching_or_passing_target_finishes() {
        let target = at(100);
        assert!(Remaining::until(target, at(100)).is_none());
        assert!(Remaining::until(target, at(5_000)).is_none());
        assert_eq!(
            Remaining::default().fields(),
            ["00", "00", "00", "00"].map(String::from)
        );
    }

    #[test]
    fn last_second_still_counts_as_running() {
        let target = at(10);
        let now = target - Duration::milliseconds(400);
        assert_eq!(Remaining::until(target, now), Some(Remaining::default()));
    }
}
