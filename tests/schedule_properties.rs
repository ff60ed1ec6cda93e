use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vehicle_financing::{
    FinancingInput, InterestModel, compute_amortization, compute_financing, effective_schedule,
};

fn tolerance() -> Decimal {
    dec!(0.000001)
}

#[rstest]
#[case(InterestModel::AddOn, dec!(72000), dec!(12), 12)]
#[case(InterestModel::AddOn, dec!(25000), dec!(9.9), 48)]
#[case(InterestModel::AddOn, dec!(18000), dec!(4), 30)]
#[case(InterestModel::Effective, dec!(72000), dec!(12), 12)]
#[case(InterestModel::Effective, dec!(33333.33), dec!(7.25), 60)]
#[case(InterestModel::Effective, dec!(150000), dec!(0), 84)]
fn principal_portions_retire_the_loan(
    #[case] model: InterestModel,
    #[case] loan: Decimal,
    #[case] rate: Decimal,
    #[case] months: u32,
) {
    let rows = compute_amortization(loan, rate, months, model).unwrap();
    assert_eq!(rows.len(), months as usize);

    let principal: Decimal = rows.iter().map(|r| r.principal_portion).sum();
    assert!((principal - loan).abs() < tolerance(), "{model}: {principal} != {loan}");

    let last = rows.last().unwrap();
    assert_eq!(last.period, months);
    assert_eq!(last.opening_balance - last.principal_portion, Decimal::ZERO);
    assert_eq!(last.payment, last.principal_portion + last.interest_portion);

    for pair in rows.windows(2) {
        let expected = pair[0].opening_balance - pair[0].principal_portion;
        assert!((pair[1].opening_balance - expected).abs() < tolerance());
    }
}

#[test]
fn scenario_a_addon() {
    let input = FinancingInput {
        price: dec!(100000),
        discount_rate: dec!(10),
        down_rate: dec!(20),
        interest_rate: dec!(12),
        term_years: 1,
        interest_model: InterestModel::AddOn,
        ..Default::default()
    };

    let outcome = compute_financing(&input).unwrap();

    assert_eq!(outcome.principal.discounted_price, dec!(90000));
    assert_eq!(outcome.principal.loan_amount, dec!(72000));
    assert_eq!(outcome.summary.months, 12);
    assert_eq!(outcome.summary.total_interest, dec!(8640));
    assert_eq!(outcome.summary.total_amount, dec!(80640));
    assert_eq!(outcome.summary.monthly_payment, dec!(6720));
}

#[test]
fn scenario_b_effective() {
    let rows = compute_amortization(dec!(72000), dec!(12), 12, InterestModel::Effective).unwrap();

    assert_eq!(rows[0].payment.round_dp(2), dec!(6397.11));
    assert_eq!(rows[0].interest_portion, dec!(720));

    let last = rows.last().unwrap();
    assert_eq!(last.opening_balance - last.principal_portion, Decimal::ZERO);
    // The forced final payment only differs from the level payment by rounding.
    assert!((last.payment - rows[0].payment).abs() < tolerance());
}

#[rstest]
#[case(dec!(72000), dec!(12), 1)]
#[case(dec!(41250.50), dec!(18.4), 5)]
#[case(dec!(9000), dec!(0), 2)]
fn effective_total_matches_payment_times_months(
    #[case] loan: Decimal,
    #[case] rate: Decimal,
    #[case] years: u32,
) {
    let summary = effective_schedule(loan, rate, years).unwrap();

    assert_eq!(summary.total_amount, summary.monthly_payment * Decimal::from(summary.months));
    assert_eq!(summary.total_interest, summary.total_amount - loan);
}

#[test]
fn effective_zero_rate_has_no_interest() {
    let summary = effective_schedule(dec!(9000), dec!(0), 2).unwrap();

    assert_eq!(summary.monthly_payment, dec!(375));
    assert_eq!(summary.total_interest, Decimal::ZERO);
}

#[test]
fn effective_zero_term_boundary() {
    let summary = effective_schedule(dec!(72000), dec!(12), 0).unwrap();

    assert_eq!(
        (summary.months, summary.monthly_payment, summary.total_interest, summary.total_amount),
        (0, dec!(0), dec!(0), dec!(72000))
    );
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(7)]
fn addon_interest_is_linear_in_years(#[case] years: u32) {
    let input = |term_years| FinancingInput {
        price: dec!(60000),
        interest_rate: dec!(6.5),
        term_years,
        ..Default::default()
    };

    let single = compute_financing(&input(years)).unwrap().summary;
    let double = compute_financing(&input(years * 2)).unwrap().summary;

    assert_eq!(single.total_interest, dec!(60000) * dec!(0.065) * Decimal::from(years));
    assert_eq!(double.total_interest, single.total_interest * dec!(2));
}
