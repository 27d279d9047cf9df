//! Reserve balance, MOCE, and variance series
//!
//! The reserve is a forward-looking present value of the remaining
//! liability flow, floored at zero and at the cohort-weighted surrender
//! value. The naive formulation is an O(N²) sweep; a reverse accumulator
//! gives the same numbers in O(N). MOCE holds a cost-of-capital charge on
//! the present value of the reserve margin.

/// Present value of `flows` at `rate`, discounting the first element one
/// period
pub fn present_value(flows: &[f64], rate: f64) -> f64 {
    flows
        .iter()
        .enumerate()
        .map(|(k, &flow)| flow / (1.0 + rate).powi(k as i32 + 1))
        .sum()
}

/// Present values of the tail `series[m+1..]` seen from each month,
/// computed with a reverse accumulator
fn tail_present_values(series: &[f64], rate: f64) -> Vec<f64> {
    let n = series.len();
    let mut pv = vec![0.0; n];
    for m in (0..n.saturating_sub(1)).rev() {
        pv[m] = (series[m + 1] + pv[m + 1]) / (1.0 + rate);
    }
    pv
}

/// Reserve balance per month: PV of remaining liability flow, floored at
/// zero and at the surrender value weighted by the living cohort
pub fn reserve_balance(
    liability_flow: &[f64],
    redemption: &[f64],
    alive_start: &[f64],
    monthly_rate: f64,
) -> Vec<f64> {
    let tail_pv = tail_present_values(liability_flow, monthly_rate);

    liability_flow
        .iter()
        .zip(&tail_pv)
        .zip(redemption)
        .zip(alive_start)
        .map(|(((&flow, &pv), &surrender), &alive)| {
            let prospective = (flow + pv).max(0.0);
            prospective.max(surrender * alive)
        })
        .collect()
}

/// MOCE series: cost-of-capital charge on the reserve margin and the
/// present value of its future path
pub fn moce(
    reserve_balance: &[f64],
    reserve_margin_rate: f64,
    cost_of_capital_monthly: f64,
    monthly_rate: f64,
) -> Vec<f64> {
    let margin: Vec<f64> = reserve_balance
        .iter()
        .map(|&r| r * reserve_margin_rate)
        .collect();
    let tail_pv = tail_present_values(&margin, monthly_rate);

    margin
        .iter()
        .zip(&tail_pv)
        .map(|(&m, &pv)| cost_of_capital_monthly * (pv + m))
        .collect()
}

/// Negated period-over-period decrements with a terminal unwind entry.
/// The result is one element longer than the input: the last entry
/// releases the full remaining balance.
pub fn variance_with_unwind(series: &[f64]) -> Vec<f64> {
    let n = series.len();
    let mut variance = Vec::with_capacity(n + 1);
    for m in 0..n {
        let previous = if m == 0 { 0.0 } else { series[m - 1] };
        variance.push(-(series[m] - previous));
    }
    variance.push(-series[n - 1]);
    variance
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_present_value_discounts_first_element() {
        let pv = present_value(&[105.0], 0.05);
        assert_relative_eq!(pv, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_tail_accumulator_matches_naive_sweep() {
        let flows = vec![10.0, -20.0, 30.0, -5.0, 12.0];
        let rate = 0.004;
        let tail = tail_present_values(&flows, rate);
        for m in 0..flows.len() {
            let naive = present_value(&flows[m + 1..], rate);
            assert_relative_eq!(tail[m], naive, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_reserve_floors_at_zero() {
        // All-positive liability flow: insurer holds no reserve need
        let liability = vec![-100.0, -100.0, -100.0];
        let redemption = vec![0.0; 3];
        let alive = vec![1.0; 3];
        let reserve = reserve_balance(&liability, &redemption, &alive, 0.004);
        for r in &reserve {
            assert_relative_eq!(*r, 0.0);
        }
    }

    #[test]
    fn test_reserve_floors_at_surrender_value() {
        let liability = vec![-100.0, -100.0, -100.0];
        let redemption = vec![500.0, 500.0, 500.0];
        let alive = vec![1.0, 0.9, 0.8];
        let reserve = reserve_balance(&liability, &redemption, &alive, 0.004);
        assert_relative_eq!(reserve[0], 500.0);
        assert_relative_eq!(reserve[1], 450.0);
        assert_relative_eq!(reserve[2], 400.0);
    }

    #[test]
    fn test_reserve_covers_future_outflow() {
        // Large outflow in month 3 must be pre-funded in months 1-2
        let liability = vec![0.0, 0.0, 1000.0];
        let redemption = vec![0.0; 3];
        let alive = vec![1.0; 3];
        let rate = 0.01;
        let reserve = reserve_balance(&liability, &redemption, &alive, rate);
        assert_relative_eq!(reserve[0], 1000.0 / 1.01f64.powi(2), epsilon = 1e-10);
        assert_relative_eq!(reserve[1], 1000.0 / 1.01, epsilon = 1e-10);
        assert_relative_eq!(reserve[2], 1000.0);
    }

    #[test]
    fn test_moce_is_charge_on_margin_path() {
        let reserve = vec![1000.0, 0.0];
        let margin_rate = 0.05;
        let ccm = 0.01;
        let rate = 0.004;
        let series = moce(&reserve, margin_rate, ccm, rate);

        let margin0 = 50.0;
        let pv_future = 0.0 / (1.0 + rate);
        assert_relative_eq!(series[0], ccm * (pv_future + margin0), epsilon = 1e-12);
    }

    #[test]
    fn test_variance_length_and_telescoping() {
        let series = vec![100.0, 150.0, 120.0];
        let variance = variance_with_unwind(&series);

        assert_eq!(variance.len(), 4);
        assert_relative_eq!(variance[0], -100.0);
        assert_relative_eq!(variance[1], -50.0);
        assert_relative_eq!(variance[2], 30.0);
        assert_relative_eq!(variance[3], -120.0);

        // Decrements telescope to -last; the terminal unwind doubles it
        let total: f64 = variance.iter().sum();
        assert_relative_eq!(total, -2.0 * series[2], epsilon = 1e-12);
    }
}
