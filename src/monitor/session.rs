//! Shanghai trading session clock

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Asia::Shanghai;
use chrono_tz::Tz;

/// Current time on the exchange clock
pub fn beijing_now() -> DateTime<Tz> {
    Utc::now().with_timezone(&Shanghai)
}

/// True during continuous trading: weekdays 09:30-11:30 and 13:00-15:00,
/// both ends inclusive at minute resolution
pub fn is_trading_session(now: &DateTime<Tz>) -> bool {
    match now.weekday() {
        Weekday::Sat | Weekday::Sun => return false,
        _ => {}
    }
    let minutes = now.hour() * 60 + now.minute();
    let morning = (9 * 60 + 30)..=(11 * 60 + 30);
    let afternoon = (13 * 60)..=(15 * 60);
    morning.contains(&minutes) || afternoon.contains(&minutes)
}
