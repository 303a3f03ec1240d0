//! Trade expectancy and position sizing formulas.
//!
//! These operate on summary statistics of a strategy's trades, expressed as
//! fractional returns: `avg_win` is positive, `avg_loss` is signed and normally
//! negative (a 2% average loss is `-0.02`).

/// Arithmetic expectancy per trade.
pub fn expectancy(win_rate: f64, avg_win: f64, avg_loss: f64) -> f64 {
    win_rate * avg_win + (1.0 - win_rate) * avg_loss
}

/// Geometric expectancy per trade: the compounded growth rate of repeatedly
/// risking the whole stake.
pub fn geometric_expectancy(win_rate: f64, avg_win: f64, avg_loss: f64) -> f64 {
    (1.0 + avg_win).powf(win_rate) * (1.0 + avg_loss).powf(1.0 - win_rate) - 1.0
}

/// Kelly fraction of capital to allocate per trade.
pub fn kelly(win_rate: f64, avg_win: f64, avg_loss: f64) -> f64 {
    win_rate / avg_loss.abs() - (1.0 - win_rate) / avg_win
}

/// Share of observations where the proposition holds. `None` without observations.
pub fn probability(outcomes: &[bool]) -> Option<f64> {
    if outcomes.is_empty() {
        return None;
    }

    let hits = outcomes.iter().filter(|&&outcome| outcome).count();
    Some(hits as f64 / outcomes.len() as f64)
}

/// Probability of `outcomes` restricted to the observations where `given` holds.
///
/// `None` when the slices differ in length or `given` never holds.
pub fn conditional(outcomes: &[bool], given: &[bool]) -> Option<f64> {
    if outcomes.len() != given.len() {
        return None;
    }

    let selected = outcomes
        .iter()
        .zip(given)
        .filter(|(_, &condition)| condition)
        .map(|(&outcome, _)| outcome)
        .collect::<Vec<_>>();

    probability(&selected)
}
