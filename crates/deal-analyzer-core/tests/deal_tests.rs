use deal_analyzer_core::deal_analysis::{
    analyze_deal, compute, compute_with_breakdown, DealField, DealInputs, DealScreen, Signal,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

/// A spread of deals covering cheap, expensive, leveraged and all-cash cases.
fn deal_grid() -> Vec<DealInputs> {
    let mut deals = Vec::new();
    for price in [dec!(0), dec!(95000), dec!(180000), dec!(1250000)] {
        for down in [dec!(0), dec!(3.5), dec!(19.999), dec!(20), dec!(100)] {
            for rate in [dec!(0), dec!(3.25), dec!(7.125)] {
                deals.push(DealInputs {
                    purchase_price: price,
                    down_payment_percentage: down,
                    interest_rate: rate,
                    ..DealInputs::default()
                });
            }
        }
    }
    deals
}

// ===========================================================================
// Seed scenario
// ===========================================================================

#[test]
fn test_seed_defaults_known_answer() {
    let (m, b) = compute_with_breakdown(&DealInputs::default());

    assert_eq!(b.loan_amount, dec!(144000));
    // 144000 at 3.25%/12 over 360 payments
    assert_close(m.mortgage_payment, dec!(626.70), dec!(0.01));
    // Down payment exactly 20%: PMI must not trigger
    assert_eq!(m.mortgage_insurance, Decimal::ZERO);
    assert_eq!(m.monthly_income, dec!(2200));
    // 36000 + 3600 + 10000 + 0
    assert_eq!(m.total_cash_needed, dec!(49600));
    assert_eq!(m.noi, dec!(18468));
    assert_eq!(m.cap_rate, dec!(10.26));
}

// ===========================================================================
// Invariants
// ===========================================================================

#[test]
fn test_cap_rate_is_noi_over_price() {
    for deal in deal_grid() {
        let m = compute(&deal);
        if deal.purchase_price > Decimal::ZERO {
            assert_eq!(m.cap_rate, m.noi / deal.purchase_price * dec!(100));
        } else {
            assert_eq!(m.cap_rate, Decimal::ZERO);
        }
    }
}

#[test]
fn test_zero_cash_needed_gives_zero_cash_on_cash() {
    let deal = DealInputs {
        down_payment_percentage: Decimal::ZERO,
        closing_costs_percentage: Decimal::ZERO,
        repair_costs: Decimal::ZERO,
        fees: Decimal::ZERO,
        ..DealInputs::default()
    };
    let m = compute(&deal);
    assert_eq!(m.total_cash_needed, Decimal::ZERO);
    assert_eq!(m.cash_on_cash, Decimal::ZERO);
}

#[test]
fn test_monthly_expenses_are_exactly_sixteen_lines() {
    let deal = DealInputs {
        down_payment_percentage: dec!(10),
        property_tax: dec!(1),
        property_insurance: dec!(2),
        maintenance_repairs: dec!(1),
        capex: dec!(2),
        property_management: dec!(4),
        vacancy: dec!(8),
        sewer: dec!(3),
        water: dec!(5),
        lawn_snow: dec!(7),
        garbage: dec!(11),
        electric: dec!(13),
        gas: dec!(17),
        hoa: dec!(19),
        other_expenses: dec!(23),
        monthly_rent: dec!(1000),
        other_income: Decimal::ZERO,
        ..DealInputs::default()
    };
    let (m, b) = compute_with_breakdown(&deal);

    let lines = [
        m.mortgage_payment,
        m.mortgage_insurance,
        deal.property_tax,
        deal.property_insurance,
        b.maintenance_amount,
        b.capex_amount,
        b.property_mgmt_amount,
        b.vacancy_amount,
        deal.sewer,
        deal.water,
        deal.lawn_snow,
        deal.garbage,
        deal.electric,
        deal.gas,
        deal.hoa,
        deal.other_expenses,
    ];
    assert_eq!(lines.len(), 16);
    let expected: Decimal = lines.iter().sum();
    assert_close(m.monthly_expenses, expected, dec!(0.0000001));

    // Percent lines: 1%, 2%, 4%, 8% of 1000
    assert_eq!(b.maintenance_amount, dec!(10));
    assert_eq!(b.capex_amount, dec!(20));
    assert_eq!(b.property_mgmt_amount, dec!(40));
    assert_eq!(b.vacancy_amount, dec!(80));
}

#[test]
fn test_each_flat_line_moves_expenses_one_for_one() {
    let base = compute(&DealInputs::default());
    for field in [
        DealField::PropertyTax,
        DealField::PropertyInsurance,
        DealField::Sewer,
        DealField::Water,
        DealField::LawnSnow,
        DealField::Garbage,
        DealField::Electric,
        DealField::Gas,
        DealField::Hoa,
        DealField::OtherExpenses,
    ] {
        let mut deal = DealInputs::default();
        deal.set(field, deal.get(field) + dec!(10)).unwrap();
        let m = compute(&deal);
        assert_close(
            m.monthly_expenses - base.monthly_expenses,
            dec!(10),
            dec!(0.0000001),
        );
    }
}

#[test]
fn test_informational_fields_do_not_move_metrics() {
    let base = compute(&DealInputs::default());
    let deal = DealInputs {
        address: "742 Evergreen Terrace".into(),
        arv: dec!(999999),
        num_units: 12,
        ..DealInputs::default()
    };
    assert_eq!(compute(&deal), base);
}

#[test]
fn test_compute_is_idempotent() {
    for deal in deal_grid() {
        assert_eq!(compute(&deal), compute(&deal));
    }
}

#[test]
fn test_no_panics_across_grid() {
    for deal in deal_grid() {
        let m = compute(&deal);
        assert_eq!(m.net_cfpu, m.monthly_income - m.monthly_expenses);
    }
}

// ===========================================================================
// PMI boundary
// ===========================================================================

#[test]
fn test_pmi_iff_enabled_and_below_twenty() {
    for deal in deal_grid() {
        for enabled in [true, false] {
            let deal = DealInputs {
                pmi_enabled: enabled,
                ..deal.clone()
            };
            let m = compute(&deal);
            let expected_on = enabled && deal.down_payment_percentage < dec!(20);
            let loan = deal.purchase_price * (Decimal::ONE - deal.down_payment_percentage / dec!(100));
            if expected_on {
                assert_eq!(m.mortgage_insurance, loan * dec!(0.005) / dec!(12));
            } else {
                assert_eq!(m.mortgage_insurance, Decimal::ZERO);
            }
        }
    }
}

#[test]
fn test_pmi_boundary_exact_twenty() {
    let at = compute(&DealInputs {
        down_payment_percentage: dec!(20),
        ..DealInputs::default()
    });
    assert_eq!(at.mortgage_insurance, Decimal::ZERO);

    let below = compute(&DealInputs {
        down_payment_percentage: dec!(19.999),
        ..DealInputs::default()
    });
    assert!(below.mortgage_insurance > Decimal::ZERO);
}

// ===========================================================================
// Amortisation edge cases
// ===========================================================================

#[test]
fn test_zero_mortgage_length_zero_payment() {
    let m = compute(&DealInputs {
        mortgage_length: 0,
        ..DealInputs::default()
    });
    assert_eq!(m.mortgage_payment, Decimal::ZERO);
}

#[test]
fn test_zero_interest_rate_linear_amortisation() {
    let m = compute(&DealInputs {
        interest_rate: Decimal::ZERO,
        mortgage_length: 15,
        ..DealInputs::default()
    });
    // 144000 / 180
    assert_eq!(m.mortgage_payment, dec!(800));
}

#[test]
fn test_all_cash_purchase_has_no_debt_service() {
    let m = compute(&DealInputs {
        down_payment_percentage: dec!(100),
        ..DealInputs::default()
    });
    assert_eq!(m.mortgage_payment, Decimal::ZERO);
    assert_eq!(m.mortgage_insurance, Decimal::ZERO);
    assert_eq!(m.net_cfpu * dec!(12), m.noi);
}

// ===========================================================================
// Analysis envelope and memoised screen
// ===========================================================================

#[test]
fn test_analysis_matches_model() {
    let deal = DealInputs {
        down_payment_percentage: dec!(5),
        ..DealInputs::default()
    };
    let output = analyze_deal(&deal).unwrap();
    assert_eq!(output.result.metrics, compute(&deal));
    assert_eq!(output.result.signals.net_cfpu, Signal::Favorable);
    assert!(output.warnings.iter().any(|w| w.contains("PMI")));
}

#[test]
fn test_analysis_serialises_snake_case() {
    let output = analyze_deal(&DealInputs::default()).unwrap();
    let json = serde_json::to_value(&output).unwrap();
    assert!(json["result"]["metrics"]["one_percent_rule"].is_string());
    assert_eq!(json["result"]["signals"]["cap_rate"], "favorable");
    let cash: Decimal = json["result"]["metrics"]["total_cash_needed"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(cash, dec!(49600));
}

#[test]
fn test_screen_tracks_field_edits() {
    let mut screen = DealScreen::default();
    screen.set(DealField::DownPaymentPercentage, dec!(10)).unwrap();
    assert!(screen.metrics().mortgage_insurance > Decimal::ZERO);
    screen.update(|d| d.pmi_enabled = false);
    assert_eq!(screen.metrics().mortgage_insurance, Decimal::ZERO);
    assert_eq!(screen.metrics(), &compute(screen.inputs()));
    assert_eq!(screen.recompute_count(), 3);
}
