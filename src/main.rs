use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use hydrogen_cost_calculator::{
    app::{self, AppError},
    config,
    form::{self, CalculatorForm},
    hydrogen::{self, TransportMode},
    i18n::{self, keys, Translator},
    ui_cli,
};
use tracing_subscriber::EnvFilter;

/// 수소 생산단가(LCOH)와 운송비 계산기 CLI.
#[derive(Debug, Parser)]
#[command(name = "hydrogen_cost_calculator_cli", version, about)]
struct Cli {
    /// 표시 언어 (auto / en / ko)
    #[arg(long, short = 'L', global = true, default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 대화형 메뉴 (기본값)
    Interactive,
    /// 생산단가(LCOH)와 CRF/고정비/변동비 분해
    Lcoh(ProductionArgs),
    /// 운송비
    Transport(TransportArgs),
    /// 생산 + 운송 합계
    Calculate {
        /// 결과 머리글에 표시할 국가
        #[arg(long)]
        country: Option<String>,
        #[command(flatten)]
        production: ProductionArgs,
        #[command(flatten)]
        transport: TransportArgs,
    },
    /// 운송 방식 단가표
    Modes,
}

/// 생략한 값은 설정 파일의 기본값을 사용한다.
#[derive(Debug, Args)]
struct ProductionArgs {
    /// CAPEX [통화/kW]
    #[arg(long)]
    capex: Option<f64>,
    /// OPEX [통화/kW·년]
    #[arg(long)]
    opex: Option<f64>,
    /// 효율 (0-1)
    #[arg(long)]
    efficiency: Option<f64>,
    /// WACC (0-1)
    #[arg(long)]
    wacc: Option<f64>,
    /// 수명 [년]
    #[arg(long)]
    lifetime: Option<u32>,
    /// 전력 단가 (단위는 --price-unit)
    #[arg(long)]
    energy_price: Option<f64>,
    /// MWh / kWh / GJ
    #[arg(long)]
    price_unit: Option<String>,
}

#[derive(Debug, Args)]
struct TransportArgs {
    /// 운송 거리 (단위는 --distance-unit)
    #[arg(long)]
    distance: Option<f64>,
    /// pipeline_new / pipeline_retrofit / shipping_LH2
    #[arg(long)]
    mode: Option<String>,
    /// km / m / mi / nmi
    #[arg(long)]
    distance_unit: Option<String>,
}

impl ProductionArgs {
    fn apply(&self, form: &mut CalculatorForm) -> Result<(), AppError> {
        if let Some(unit) = &self.price_unit {
            form.set_energy_price_unit(unit.parse()?);
        }
        if let Some(v) = self.capex {
            form.capex_per_kw = v;
        }
        if let Some(v) = self.opex {
            form.opex_per_kw_year = v;
        }
        if let Some(v) = self.efficiency {
            form.efficiency = v;
        }
        if let Some(v) = self.wacc {
            form.wacc = v;
        }
        if let Some(v) = self.lifetime {
            form.lifetime_years = v;
        }
        if let Some(v) = self.energy_price {
            form.energy_price = v;
        }
        Ok(())
    }
}

impl TransportArgs {
    fn apply(&self, form: &mut CalculatorForm) -> Result<(), AppError> {
        if let Some(unit) = &self.distance_unit {
            form.set_distance_unit(unit.parse()?);
        }
        if let Some(v) = self.distance {
            form.transport_distance = v;
        }
        if let Some(code) = &self.mode {
            form.transport_mode = code.parse::<TransportMode>()?;
        }
        Ok(())
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let fallback_tr = Translator::new(&i18n::resolve_language(&cli.lang, None));
    if let Err(err) = try_run(cli) {
        tracing::debug!(error = %err, "command failed");
        eprintln!(
            "{}: {}",
            fallback_tr.t(keys::ERROR_PREFIX),
            err.localized(&fallback_tr)
        );
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_create(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    tracing::info!(lang = %lang, "cli started");
    let currency = cfg.currency_symbol.clone();
    let mut form = CalculatorForm::from_config(&cfg);

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => app::run(&mut cfg, &cli.config, &tr)?,
        Command::Lcoh(args) => {
            args.apply(&mut form)?;
            let result = hydrogen::compute_lcoh(&form.lcoh_input()?)?;
            println!("{} {:.5}", tr.t(keys::RESULT_CRF), result.capital_recovery_factor);
            println!(
                "{} {}",
                tr.t(keys::RESULT_FIXED),
                hydrogen::format_per_kg(result.fixed_costs, &currency)
            );
            println!(
                "{} {}",
                tr.t(keys::RESULT_VARIABLE),
                hydrogen::format_per_kg(result.variable_costs, &currency)
            );
            println!(
                "{} {}",
                tr.t(keys::RESULT_LCOH),
                hydrogen::format_per_kg(result.lcoh_per_kg, &currency)
            );
        }
        Command::Transport(args) => {
            args.apply(&mut form)?;
            let cost = hydrogen::transport_cost(form.distance_km()?, form.transport_mode)?;
            println!(
                "{} {}",
                tr.t(keys::RESULT_TRANSPORT),
                hydrogen::format_per_kg(cost, &currency)
            );
        }
        Command::Calculate {
            country,
            production,
            transport,
        } => {
            if let Some(country) = country {
                form.country = country;
            }
            production.apply(&mut form)?;
            transport.apply(&mut form)?;
            let report = form.submit()?;
            for line in form::render_report(&report, &tr, &currency) {
                println!("{line}");
            }
            for line in form::render_breakdown(&report, &tr, &currency) {
                println!("  {line}");
            }
        }
        Command::Modes => ui_cli::print_modes(&tr, &currency),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn unknown_mode_flag_is_rejected() {
        let cli = Cli::try_parse_from(["cli", "transport", "--distance", "2000", "--mode", "rail"])
            .unwrap();
        let Some(Command::Transport(args)) = cli.command else {
            panic!("expected transport command");
        };
        let mut form = CalculatorForm::default();
        let err = args.apply(&mut form).unwrap_err();
        assert!(matches!(
            err,
            AppError::Transport(hydrogen::TransportError::UnknownMode(ref m)) if m == "rail"
        ));
    }

    #[test]
    fn calculate_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "cli",
            "calculate",
            "--country",
            "Chile",
            "--wacc",
            "0",
            "--distance",
            "100",
            "--distance-unit",
            "mi",
        ])
        .unwrap();
        let Some(Command::Calculate {
            country,
            production,
            transport,
        }) = cli.command
        else {
            panic!("expected calculate command");
        };
        assert_eq!(country.as_deref(), Some("Chile"));
        let mut form = CalculatorForm::default();
        production.apply(&mut form).unwrap();
        transport.apply(&mut form).unwrap();
        assert_eq!(form.wacc, 0.0);
        assert_eq!(form.capex_per_kw, 900.0);
        assert!((form.distance_km().unwrap() - 160.9344).abs() < 1e-9);
    }
}
