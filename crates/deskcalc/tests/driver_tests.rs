//! Behavioural scenarios written once, run against every front end

#![allow(clippy::unwrap_used)]

use deskcalc::prelude::*;

fn scenario_entry<D: CalculatorDriver>(d: &mut D) {
    assert_eq!(d.press_keys("1000").unwrap().display, "1,000");
    assert_eq!(d.press_keys(".5").unwrap().display, "1,000.5");
    assert_eq!(d.press_keys("C").unwrap(), View::default());
}

fn scenario_length_limit<D: CalculatorDriver>(d: &mut D) {
    let full = d.press_keys("1234567890123456").unwrap();
    assert_eq!(d.press_keys("7").unwrap(), full);
    assert_eq!(full.display, "1,234,567,890,123,456");
}

fn scenario_division_by_zero<D: CalculatorDriver>(d: &mut D) {
    let view = d.press_keys("6/0=").unwrap();
    assert!(view.is_error);
    assert_eq!(view.display, "Error");
    assert_eq!(view.secondary, "Cannot divide by zero");
    // The next key dismisses the error
    let view = d.press_keys("4").unwrap();
    assert!(!view.is_error);
    assert_eq!(view.display, "4");
}

fn scenario_percent<D: CalculatorDriver>(d: &mut D) {
    let view = d.press_keys("5+2%").unwrap();
    assert_eq!(view.display, "0.1");
    assert_eq!(view.secondary, "5 + 0.1");
}

fn scenario_fresh_entry_after_result<D: CalculatorDriver>(d: &mut D) {
    let view = d.press_keys("8*5=").unwrap();
    assert_eq!(view.display, "40");
    assert_eq!(view.secondary, "8*5 = ");
    let view = d.press_keys("3").unwrap();
    assert_eq!(view.display, "3");
    assert_eq!(view.secondary, "");
}

fn scenario_backspace<D: CalculatorDriver>(d: &mut D) {
    assert_eq!(d.press_keys("12⌫").unwrap().display, "1");
    assert_eq!(d.press_keys("<").unwrap().display, "0");
    assert_eq!(d.press_keys("<").unwrap().display, "0");
}

fn scenario_memory_line<D: CalculatorDriver>(d: &mut D) {
    assert_eq!(d.press_keys("1500+").unwrap().secondary, "1,500 +");
    assert_eq!(d.press_keys("25").unwrap().secondary, "1,500 + 25");
    assert_eq!(d.press_keys("=").unwrap().display, "1,525");
}

fn run_all<D: CalculatorDriver>(make: impl Fn() -> D) {
    scenario_entry(&mut make());
    scenario_length_limit(&mut make());
    scenario_division_by_zero(&mut make());
    scenario_percent(&mut make());
    scenario_fresh_entry_after_result(&mut make());
    scenario_backspace(&mut make());
    scenario_memory_line(&mut make());
}

#[test]
fn test_engine_driver_scenarios() {
    run_all(EngineDriver::new);
}

#[cfg(feature = "tui")]
#[test]
fn test_tui_driver_scenarios() {
    run_all(TuiDriver::new);
}

#[test]
fn test_precision_applies_to_every_driver() {
    let config = EngineConfig::new().with_fraction_digits(3);
    let mut engine = EngineDriver::with_config(config);
    assert_eq!(engine.press_keys("2/3=").unwrap().display, "0.667");

    #[cfg(feature = "tui")]
    {
        let mut tui = TuiDriver::with_config(config);
        assert_eq!(tui.press_keys("2/3=").unwrap().display, "0.667");
    }
}
