use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::{Config, UnitSystem};
use crate::form::{self, CalculatorForm, Field};
use crate::hydrogen::{self, TransportMode};
use crate::i18n::{keys, Translator};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Lcoh,
    Transport,
    Full,
    Modes,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    select_menu(&mut io::stdin().lock(), tr)
}

/// 입력이 닫히면(EOF) 종료를 선택한 것으로 본다.
fn select_menu<R: BufRead>(input: &mut R, tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    for key in [
        keys::MAIN_MENU_LCOH,
        keys::MAIN_MENU_TRANSPORT,
        keys::MAIN_MENU_FULL,
        keys::MAIN_MENU_MODES,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = match read_line_from(input, &tr.t(keys::PROMPT_MENU_SELECT)) {
            Ok(sel) => sel,
            Err(e) if e.is_end_of_input() => return Ok(MenuChoice::Exit),
            Err(e) => return Err(e),
        };
        if let Some(choice) = parse_menu_choice(&sel) {
            return Ok(choice);
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::Lcoh),
        "2" => Some(MenuChoice::Transport),
        "3" => Some(MenuChoice::Full),
        "4" => Some(MenuChoice::Modes),
        "5" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 생산단가(LCOH) 메뉴를 처리한다.
pub fn handle_lcoh(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::LCOH_HEADING));
    println!("{}", tr.t(keys::HELP_LCOH));
    let mut form = CalculatorForm::from_config(cfg);
    read_production_fields(tr, &mut form)?;
    let result = form.lcoh_input().and_then(|input| {
        hydrogen::compute_lcoh(&input).map_err(|e| hydrogen::ScenarioError::from(e).into())
    });
    match result {
        Ok(r) => {
            let cur = &cfg.currency_symbol;
            println!("{} {:.5}", tr.t(keys::RESULT_CRF), r.capital_recovery_factor);
            println!("{} {}", tr.t(keys::RESULT_FIXED), hydrogen::format_per_kg(r.fixed_costs, cur));
            println!("{} {}", tr.t(keys::RESULT_VARIABLE), hydrogen::format_per_kg(r.variable_costs, cur));
            println!("{} {}", tr.t(keys::RESULT_LCOH), hydrogen::format_per_kg(r.lcoh_per_kg, cur));
        }
        Err(e) => print_error(&form::describe_form_error(&e, tr), tr),
    }
    Ok(())
}

/// 운송비 메뉴를 처리한다.
pub fn handle_transport(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::TRANSPORT_HEADING));
    println!("{}", tr.t(keys::HELP_TRANSPORT));
    let mut form = CalculatorForm::from_config(cfg);
    read_transport_fields(tr, &mut form)?;
    let result = form.distance_km().and_then(|km| {
        hydrogen::transport_cost(km, form.transport_mode)
            .map_err(|e| hydrogen::ScenarioError::from(e).into())
    });
    match result {
        Ok(cost) => println!(
            "{} {}",
            tr.t(keys::RESULT_TRANSPORT),
            hydrogen::format_per_kg(cost, &cfg.currency_symbol)
        ),
        Err(e) => print_error(&form::describe_form_error(&e, tr), tr),
    }
    Ok(())
}

/// 생산 + 운송 전체 계산 메뉴를 처리한다.
pub fn handle_full(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::FULL_HEADING));
    let mut form = CalculatorForm::from_config(cfg);
    let country = read_line(&format!("{}: ", tr.t(keys::FIELD_COUNTRY)))?;
    if !country.trim().is_empty() {
        form.country = country.trim().to_string();
    }
    read_production_fields(tr, &mut form)?;
    read_transport_fields(tr, &mut form)?;
    match form.submit() {
        Ok(report) => {
            println!();
            for line in form::render_report(&report, tr, &cfg.currency_symbol) {
                println!("{line}");
            }
            for line in form::render_breakdown(&report, tr, &cfg.currency_symbol) {
                println!("  {line}");
            }
        }
        Err(e) => print_error(&form::describe_form_error(&e, tr), tr),
    }
    Ok(())
}

/// 운송 방식별 단가표를 출력한다.
pub fn print_modes(tr: &Translator, currency: &str) {
    println!("{}", tr.t(keys::MODES_HEADING));
    for (i, mode) in TransportMode::ALL.iter().enumerate() {
        println!(
            "{}) {:<18} {:<22} {currency}{:.2}",
            i + 1,
            mode.code(),
            tr.t(form::mode_label_key(*mode)),
            mode.unit_cost_per_1000km()
        );
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}", tr.t(keys::HELP_SETTINGS));
    println!("{} {:?}", tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM), cfg.unit_system);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let system = match sel.trim() {
        "" => return Ok(()),
        "1" => UnitSystem::Metric,
        "2" => UnitSystem::Imperial,
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    };
    cfg.apply_unit_system(system);
    println!("{} {:?}", tr.t(keys::SETTINGS_SAVED), cfg.unit_system);
    Ok(())
}

fn read_production_fields(tr: &Translator, form: &mut CalculatorForm) -> Result<(), AppError> {
    form.capex_per_kw = read_field(tr, Field::Capex, "", form.capex_per_kw)?;
    form.opex_per_kw_year = read_field(tr, Field::Opex, "", form.opex_per_kw_year)?;
    form.efficiency = read_field(tr, Field::Efficiency, "", form.efficiency)?;
    form.wacc = read_field(tr, Field::Wacc, "", form.wacc)?;
    form.lifetime_years = read_lifetime(tr, form.lifetime_years)?;
    let unit = format!(" [{}]", form.energy_price_unit.symbol());
    form.energy_price = read_field(tr, Field::EnergyPrice, &unit, form.energy_price)?;
    Ok(())
}

fn read_transport_fields(tr: &Translator, form: &mut CalculatorForm) -> Result<(), AppError> {
    let unit = format!(" [{}]", form.distance_unit.symbol());
    form.transport_distance = read_field(tr, Field::Distance, &unit, form.transport_distance)?;
    form.transport_mode = read_mode(tr, form.transport_mode)?;
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    read_line_from(&mut io::stdin().lock(), prompt)
}

/// 한 줄을 읽는다. 더 읽을 입력이 없으면 `UnexpectedEof`를 돌려준다.
fn read_line_from<R: BufRead>(input: &mut R, prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }
    Ok(buf)
}

/// 숫자 필드를 읽는다. 엔터만 누르면 기본값, 범위를 벗어나면 다시 묻는다.
fn read_field(tr: &Translator, field: Field, suffix: &str, default: f64) -> Result<f64, AppError> {
    let hint = tr.fill(keys::PROMPT_DEFAULT_HINT, &[("default", default.to_string())]);
    let prompt = format!("{}{suffix} {hint}: ", tr.t(field.label_key()));
    loop {
        let s = read_line(&prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) => match form::check_field(field, v) {
                Ok(v) => return Ok(v),
                Err(e) => print_error(&form::describe_form_error(&e, tr), tr),
            },
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_lifetime(tr: &Translator, default: u32) -> Result<u32, AppError> {
    let hint = tr.fill(keys::PROMPT_DEFAULT_HINT, &[("default", default.to_string())]);
    let prompt = format!("{} {hint}: ", tr.t(keys::FIELD_LIFETIME));
    loop {
        let s = read_line(&prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<u32>() {
            Ok(v) if v >= 1 => return Ok(v),
            _ => println!("{}", tr.t(keys::ERROR_INVALID_INTEGER)),
        }
    }
}

/// 운송 방식은 번호 목록에서만 고른다.
fn read_mode(tr: &Translator, default: TransportMode) -> Result<TransportMode, AppError> {
    println!("{}:", tr.t(keys::FIELD_MODE));
    for (i, mode) in TransportMode::ALL.iter().enumerate() {
        println!("  {}) {} ({})", i + 1, tr.t(form::mode_label_key(*mode)), mode.code());
    }
    let hint = tr.fill(keys::PROMPT_DEFAULT_HINT, &[("default", default.code().to_string())]);
    loop {
        let sel = read_line(&format!("{} {hint}", tr.t(keys::PROMPT_SELECT)))?;
        if sel.trim().is_empty() {
            return Ok(default);
        }
        if let Some(mode) = parse_mode_choice(&sel) {
            return Ok(mode);
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

fn parse_mode_choice(sel: &str) -> Option<TransportMode> {
    let n: usize = sel.trim().parse().ok()?;
    n.checked_sub(1).and_then(|i| TransportMode::ALL.get(i).copied())
}

fn print_error(message: &str, tr: &Translator) {
    tracing::debug!(%message, "input rejected");
    println!("{}: {message}", tr.t(keys::ERROR_PREFIX));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::EnvFilter;

    #[test]
    fn menu_numbers_map_to_choices() {
        assert_eq!(parse_menu_choice("3\n"), Some(MenuChoice::Full));
        assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("9"), None);
    }

    #[test]
    fn closed_input_exits_menu() {
        let tr = Translator::new("en");
        let mut empty = io::Cursor::new("");
        assert_eq!(select_menu(&mut empty, &tr).unwrap(), MenuChoice::Exit);
    }

    #[test]
    fn menu_retries_until_valid_choice() {
        let tr = Translator::new("en");
        let mut input = io::Cursor::new("x\n\n3\n");
        assert_eq!(select_menu(&mut input, &tr).unwrap(), MenuChoice::Full);
    }

    #[test]
    fn read_line_reports_end_of_input() {
        let mut input = io::Cursor::new("12\n");
        assert_eq!(read_line_from(&mut input, "").unwrap(), "12\n");
        assert!(read_line_from(&mut input, "").unwrap_err().is_end_of_input());
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejected_input_is_silent_at_default_log_level() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("warn"))
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            print_error("capex must be at least 0 (got -1)", &Translator::new("en"));
        });
        assert!(log.0.lock().unwrap().is_empty());
    }

    #[test]
    fn mode_choice_is_one_based() {
        assert_eq!(parse_mode_choice("1"), Some(TransportMode::PipelineNew));
        assert_eq!(parse_mode_choice("3"), Some(TransportMode::ShippingLh2));
        assert_eq!(parse_mode_choice("0"), None);
        assert_eq!(parse_mode_choice("4"), None);
        assert_eq!(parse_mode_choice("rail"), None);
    }
}
