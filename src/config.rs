use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::hydrogen::TransportMode;
use crate::units::{EnergyPriceUnit, LengthUnit};

/// 기본 설정 파일 경로(작업 디렉터리 기준).
pub const CONFIG_FILE: &str = "config.toml";

/// 사용 가능한 단위 시스템 프리셋을 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// km, 통화/MWh. 내부 계산 기본값.
    Metric,
    /// mile, 통화/MWh
    Imperial,
}

impl UnitSystem {
    /// 프리셋에 해당하는 기본 단위 세트.
    pub fn default_units(self) -> DefaultUnits {
        match self {
            UnitSystem::Metric => DefaultUnits {
                distance: LengthUnit::Kilometer,
                energy_price: EnergyPriceUnit::PerMegawattHour,
            },
            UnitSystem::Imperial => DefaultUnits {
                distance: LengthUnit::Mile,
                energy_price: EnergyPriceUnit::PerMegawattHour,
            },
        }
    }
}

/// 입력 폼의 기본 표시 단위.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultUnits {
    pub distance: LengthUnit,
    pub energy_price: EnergyPriceUnit,
}

impl Default for DefaultUnits {
    fn default() -> Self {
        UnitSystem::Metric.default_units()
    }
}

/// 폼 초기값. 거리는 km, 전력 단가는 통화/MWh 기준으로 저장한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub country: String,
    pub capex_per_kw: f64,
    pub opex_per_kw_year: f64,
    pub efficiency: f64,
    pub wacc: f64,
    pub lifetime_years: u32,
    pub energy_price_per_mwh: f64,
    pub transport_distance_km: f64,
    pub transport_mode: TransportMode,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            country: String::new(),
            capex_per_kw: 900.0,
            opex_per_kw_year: 20.0,
            efficiency: 0.66,
            wacc: 0.08,
            lifetime_years: 25,
            energy_price_per_mwh: 50.0,
            transport_distance_km: 2000.0,
            transport_mode: TransportMode::PipelineNew,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub unit_system: UnitSystem,
    pub default_units: DefaultUnits,
    /// auto / en / ko 등. auto는 시스템 로케일을 따른다.
    pub language: String,
    /// 외부 언어팩 디렉터리(선택)
    pub language_pack_dir: Option<String>,
    pub currency_symbol: String,
    /// GUI 창 투명도(0.3~1.0)
    pub window_alpha: f32,
    pub defaults: FormDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            default_units: DefaultUnits::default(),
            language: "auto".into(),
            language_pack_dir: None,
            currency_symbol: "$".into(),
            window_alpha: 1.0,
            defaults: FormDefaults::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(Path::new(CONFIG_FILE))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값으로 새로 만든다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "loaded config");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 단위 프리셋을 적용한다.
    pub fn apply_unit_system(&mut self, system: UnitSystem) {
        self.unit_system = system;
        self.default_units = system.default_units();
    }
}
