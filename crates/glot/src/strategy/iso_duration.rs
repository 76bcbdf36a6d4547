//! ISO-8601 durations (`PT1H30M`, `P2D`, `-P1W`) for interval bounds.
//!
//! Years count as 365 days and months as 30 days.

use chrono::TimeDelta;
use winnow::ascii::digit1;
use winnow::combinator::{opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::one_of;

/// Parse an ISO-8601 duration. Returns `None` if the text is not one.
pub fn parse_duration(text: &str) -> Option<TimeDelta> {
    duration.parse(text.trim()).ok()
}

fn duration(input: &mut &str) -> ModalResult<TimeDelta> {
    let negative = opt('-').parse_next(input)?.is_some();
    'P'.parse_next(input)?;
    let date = date_components.parse_next(input)?;
    let time = opt(preceded('T', time_components))
        .parse_next(input)?
        .flatten();
    let total = match (date, time) {
        (None, None) => return Err(ErrMode::Backtrack(ContextError::new())),
        (date, time) => date.unwrap_or_default() + time.unwrap_or_default(),
    };
    Ok(if negative { -total } else { total })
}

/// `nY nM nW nD`, each optional. `None` if none are present.
fn date_components(input: &mut &str) -> ModalResult<Option<TimeDelta>> {
    let mut total: Option<TimeDelta> = None;
    for (designator, days) in [('Y', 365), ('M', 30), ('W', 7), ('D', 1)] {
        if let Some(n) = opt(component(designator)).parse_next(input)? {
            let part = n
                .checked_mul(days)
                .and_then(TimeDelta::try_days)
                .ok_or(ErrMode::Cut(ContextError::new()))?;
            total = Some(total.unwrap_or_default() + part);
        }
    }
    Ok(total)
}

/// `nH nM n[.n]S`, each optional. `None` if none are present.
fn time_components(input: &mut &str) -> ModalResult<Option<TimeDelta>> {
    let hours = opt(component('H')).parse_next(input)?.map(TimeDelta::hours);
    let minutes = opt(component('M')).parse_next(input)?.map(TimeDelta::minutes);
    let seconds = opt(seconds).parse_next(input)?;
    Ok([hours, minutes, seconds]
        .into_iter()
        .flatten()
        .reduce(|sum, part| sum + part))
}

fn component(mut designator: char) -> impl FnMut(&mut &str) -> ModalResult<i64> {
    move |input: &mut &str| {
        let n = digit1.try_map(str::parse::<i64>).parse_next(input)?;
        designator.parse_next(input)?;
        Ok(n)
    }
}

fn seconds(input: &mut &str) -> ModalResult<TimeDelta> {
    let whole = digit1.try_map(str::parse::<i64>).parse_next(input)?;
    let fraction = opt(preceded(one_of(['.', ',']), digit1)).parse_next(input)?;
    'S'.parse_next(input)?;
    let nanos = fraction.map_or(0, |digits: &str| {
        format!("{digits:0<9}")
            .get(..9)
            .and_then(|padded| padded.parse::<i64>().ok())
            .unwrap_or(0)
    });
    Ok(TimeDelta::seconds(whole) + TimeDelta::nanoseconds(nanos))
}
