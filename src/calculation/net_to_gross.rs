//! Net-to-gross salary solver.
//!
//! Net salary is a piecewise-linear, non-decreasing function of gross with
//! kinks at the insurance caps and every tax bracket boundary, so there is
//! no closed-form inverse. The solver rescales a gross estimate by the
//! ratio of target to computed net until it has grosses known to net both
//! below and above the target.
//!
//! Once the target is bracketed, the next estimate interpolates linearly
//! between the two ends (false position), which is exact when both ends
//! sit on the same linear piece. A step that fails to halve the bracket is
//! followed by a bisection, so the bracket at least halves every two
//! evaluations. Rescaling alone cannot guarantee that: with a large fixed
//! insurance charge (a custom insurance base, or insurance on the regional
//! floor exceeding a small gross) the rescaling map oscillates around the
//! solution without closing in.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::RateTable;
use crate::models::{MAX_AMOUNT, SalaryBreakdown, SalaryRequest};

use super::gross_to_net::compute_net_from_gross;

/// A gross estimate and the net it produced.
#[derive(Debug, Clone, Copy)]
struct Sample {
    gross: Decimal,
    net: Decimal,
}

/// First gross estimate for a target net.
///
/// Assumes the full employee insurance rate plus the configured average
/// tax rate when the target exceeds the personal deduction, and insurance
/// alone otherwise. Never below the target nor above [`MAX_AMOUNT`].
pub fn seed_gross(target_net: Decimal, request: &SalaryRequest, rates: &RateTable) -> Decimal {
    let target_net = target_net.clamp(Decimal::ZERO, MAX_AMOUNT);
    let insurance_rate = rates.employee_rates.total(request.nationality);
    let retained = if target_net > rates.personal_deduction {
        Decimal::ONE - insurance_rate - rates.solver.assumed_average_tax_rate
    } else {
        Decimal::ONE - insurance_rate
    };

    let seed = if retained > Decimal::ZERO {
        target_net.checked_div(retained).unwrap_or(MAX_AMOUNT)
    } else {
        target_net
    };
    seed.clamp(target_net, MAX_AMOUNT)
}

/// Finds the gross salary whose net matches `target_net`.
///
/// Runs at most `rates.solver.max_iterations` forward evaluations and stops
/// as soon as the computed net is within `rates.solver.tolerance` of the
/// target. If the budget runs out, or the target is above the net of a
/// [`MAX_AMOUNT`] gross, the last breakdown is returned anyway with
/// `converged` set to false.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::compute_gross_from_net;
/// use salary_engine::config::ConfigLoader;
/// use salary_engine::models::*;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/vn").unwrap();
/// let request = SalaryRequest {
///     amount: Decimal::new(17_775_000, 0),
///     mode: CalculationMode::NetToGross,
///     currency: Currency::Vnd,
///     exchange_rate: None,
///     insurance_basis: InsuranceBasis::Official,
///     custom_insurance_base: None,
///     tax_method: TaxMethod::Progressive,
///     region: Region::One,
///     dependents: 1,
///     nationality: Nationality::Domestic,
///     include_employer_union_fee: false,
/// };
///
/// let breakdown = compute_gross_from_net(request.amount, &request, loader.latest());
/// assert!(breakdown.converged);
/// assert!((breakdown.gross - Decimal::new(20_000_000, 0)).abs() < Decimal::new(10, 0));
/// ```
pub fn compute_gross_from_net(
    target_net: Decimal,
    request: &SalaryRequest,
    rates: &RateTable,
) -> SalaryBreakdown {
    let target_net = target_net.clamp(Decimal::ZERO, MAX_AMOUNT);
    let settings = &rates.solver;
    let max_iterations = settings.max_iterations.max(1);

    let mut gross = seed_gross(target_net, request, rates);
    let mut breakdown = compute_net_from_gross(gross, request, rates);
    let mut iterations = 1;
    let mut below: Option<Sample> = None;
    let mut above: Option<Sample> = None;
    let mut last_width: Option<Decimal> = None;

    loop {
        let difference = (breakdown.net - target_net).abs();
        debug!(
            iteration = iterations,
            gross = %gross,
            net = %breakdown.net,
            difference = %difference,
            "Net-to-gross iteration"
        );

        if difference <= settings.tolerance {
            breakdown.converged = true;
            break;
        }

        if gross >= MAX_AMOUNT && breakdown.net < target_net {
            warn!(
                target_net = %target_net,
                max_net = %breakdown.net,
                "Net-to-gross target exceeds the net of the largest supported gross"
            );
            breakdown.converged = false;
            break;
        }

        if iterations >= max_iterations {
            warn!(
                target_net = %target_net,
                last_gross = %gross,
                last_net = %breakdown.net,
                iterations,
                "Net-to-gross solver did not converge; returning best effort"
            );
            breakdown.converged = false;
            break;
        }

        let sample = Sample {
            gross,
            net: breakdown.net,
        };
        if sample.net < target_net {
            below = Some(below.map_or(sample, |b| if sample.gross > b.gross { sample } else { b }));
        } else {
            above = Some(above.map_or(sample, |a| if sample.gross < a.gross { sample } else { a }));
        }

        gross = match (below, above) {
            (Some(low), Some(high)) => {
                let width = high.gross - low.gross;
                let halved = last_width.is_none_or(|last| width * Decimal::TWO <= last);
                last_width = Some(width);
                if halved {
                    false_position(low, high, target_net)
                } else {
                    midpoint(low, high)
                }
            }
            _ => rescale(sample, target_net),
        };

        breakdown = compute_net_from_gross(gross, request, rates);
        iterations += 1;
    }

    breakdown.iterations = iterations;
    breakdown
}

/// Scales a gross estimate by `target / net`.
fn rescale(sample: Sample, target_net: Decimal) -> Decimal {
    let next = if sample.net > Decimal::ZERO {
        target_net
            .checked_div(sample.net)
            .and_then(|ratio| ratio.checked_mul(sample.gross))
            .unwrap_or(MAX_AMOUNT)
    } else {
        // Net clamped to zero: push well past the insurance floor.
        sample.gross * Decimal::new(15, 1) + target_net
    };
    next.clamp(target_net, MAX_AMOUNT)
}

/// Interpolates between the bracket ends; bisects if that leaves the bracket.
fn false_position(low: Sample, high: Sample, target_net: Decimal) -> Decimal {
    let rise = high.net - low.net;
    if rise <= Decimal::ZERO {
        return midpoint(low, high);
    }

    let next = low.gross + (target_net - low.net) / rise * (high.gross - low.gross);
    if next <= low.gross || next >= high.gross {
        midpoint(low, high)
    } else {
        next
    }
}

fn midpoint(low: Sample, high: Sample) -> Decimal {
    (low.gross + high.gross) / Decimal::TWO
}
