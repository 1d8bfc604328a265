//! 입력 폼과 계산 코어 사이의 경계.
//!
//! 원 폼 위젯과 같은 범위로 숫자 입력을 검사하고, 표시 단위를 km / 통화/MWh로
//! 환산한 뒤 두 계산기를 호출한다. CLI와 GUI가 같은 검증 규칙을 공유한다.

use crate::config::Config;
use crate::hydrogen::{
    self, CostReport, CostScenario, LcohError, LcohInput, ScenarioError, TransportError,
    TransportMode,
};
use crate::i18n::{keys, Translator};
use crate::units::{
    convert_energy_price, convert_length, EnergyPriceUnit, LengthUnit, UnitParseError,
};

/// 범위 검사 대상 숫자 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Capex,
    Opex,
    Efficiency,
    Wacc,
    Lifetime,
    EnergyPrice,
    Distance,
}

impl Field {
    /// 허용 범위 (최소, 최대). 최대가 없으면 None.
    pub fn range(self) -> (f64, Option<f64>) {
        match self {
            Field::Efficiency | Field::Wacc => (0.0, Some(1.0)),
            Field::Lifetime => (1.0, None),
            Field::Capex | Field::Opex | Field::EnergyPrice | Field::Distance => (0.0, None),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Field::Capex => "capex",
            Field::Opex => "opex",
            Field::Efficiency => "efficiency",
            Field::Wacc => "wacc",
            Field::Lifetime => "lifetime",
            Field::EnergyPrice => "energy_price",
            Field::Distance => "distance",
        }
    }

    /// 화면 표시용 번역 키.
    pub fn label_key(self) -> &'static str {
        match self {
            Field::Capex => keys::FIELD_CAPEX,
            Field::Opex => keys::FIELD_OPEX,
            Field::Efficiency => keys::FIELD_EFFICIENCY,
            Field::Wacc => keys::FIELD_WACC,
            Field::Lifetime => keys::FIELD_LIFETIME,
            Field::EnergyPrice => keys::FIELD_ENERGY_PRICE,
            Field::Distance => keys::FIELD_DISTANCE,
        }
    }
}

/// 폼 검증 및 제출 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{field} 값이 숫자가 아닙니다")]
    NotANumber { field: &'static str },
    #[error("{field} 값은 {min} 이상이어야 합니다 (입력: {value})")]
    BelowMinimum {
        field: &'static str,
        value: f64,
        min: f64,
    },
    #[error("{field} 값은 {max} 이하여야 합니다 (입력: {value})")]
    AboveMaximum {
        field: &'static str,
        value: f64,
        max: f64,
    },
    #[error(transparent)]
    Calculation(#[from] ScenarioError),
}

/// 필드 범위를 검사하고 통과하면 값을 그대로 돌려준다.
pub fn check_field(field: Field, value: f64) -> Result<f64, FormError> {
    if value.is_nan() {
        return Err(FormError::NotANumber { field: field.code() });
    }
    let (min, max) = field.range();
    if value < min {
        return Err(FormError::BelowMinimum {
            field: field.code(),
            value,
            min,
        });
    }
    if let Some(max) = max {
        if value > max {
            return Err(FormError::AboveMaximum {
                field: field.code(),
                value,
                max,
            });
        }
    }
    Ok(value)
}

/// 계산기 폼 상태. 거리와 전력 단가는 선택된 표시 단위 기준 값이다.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorForm {
    pub country: String,
    pub capex_per_kw: f64,
    pub opex_per_kw_year: f64,
    pub efficiency: f64,
    pub wacc: f64,
    pub lifetime_years: u32,
    pub energy_price: f64,
    pub energy_price_unit: EnergyPriceUnit,
    pub transport_distance: f64,
    pub distance_unit: LengthUnit,
    pub transport_mode: TransportMode,
}

impl Default for CalculatorForm {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CalculatorForm {
    /// 설정의 초기값과 기본 단위로 폼을 만든다.
    pub fn from_config(cfg: &Config) -> Self {
        let d = &cfg.defaults;
        let units = &cfg.default_units;
        Self {
            country: d.country.clone(),
            capex_per_kw: d.capex_per_kw,
            opex_per_kw_year: d.opex_per_kw_year,
            efficiency: d.efficiency,
            wacc: d.wacc,
            lifetime_years: d.lifetime_years,
            energy_price: convert_energy_price(
                d.energy_price_per_mwh,
                EnergyPriceUnit::PerMegawattHour,
                units.energy_price,
            ),
            energy_price_unit: units.energy_price,
            transport_distance: convert_length(
                d.transport_distance_km,
                LengthUnit::Kilometer,
                units.distance,
            ),
            distance_unit: units.distance,
            transport_mode: d.transport_mode,
        }
    }

    /// 거리 단위를 바꾸면서 현재 값을 환산한다.
    pub fn set_distance_unit(&mut self, unit: LengthUnit) {
        self.transport_distance = convert_length(self.transport_distance, self.distance_unit, unit);
        self.distance_unit = unit;
    }

    /// 전력 단가 단위를 바꾸면서 현재 값을 환산한다.
    pub fn set_energy_price_unit(&mut self, unit: EnergyPriceUnit) {
        self.energy_price = convert_energy_price(self.energy_price, self.energy_price_unit, unit);
        self.energy_price_unit = unit;
    }

    pub fn lcoh_input(&self) -> Result<LcohInput, FormError> {
        check_field(Field::Lifetime, f64::from(self.lifetime_years))?;
        let energy_price = check_field(Field::EnergyPrice, self.energy_price)?;
        Ok(LcohInput {
            capex_per_kw: check_field(Field::Capex, self.capex_per_kw)?,
            opex_per_kw_year: check_field(Field::Opex, self.opex_per_kw_year)?,
            efficiency: check_field(Field::Efficiency, self.efficiency)?,
            wacc: check_field(Field::Wacc, self.wacc)?,
            lifetime_years: self.lifetime_years,
            energy_price_per_mwh: convert_energy_price(
                energy_price,
                self.energy_price_unit,
                EnergyPriceUnit::PerMegawattHour,
            ),
        })
    }

    pub fn distance_km(&self) -> Result<f64, FormError> {
        let d = check_field(Field::Distance, self.transport_distance)?;
        Ok(convert_length(d, self.distance_unit, LengthUnit::Kilometer))
    }

    /// 검증된 값으로 계산 시나리오를 만든다.
    pub fn to_scenario(&self) -> Result<CostScenario, FormError> {
        Ok(CostScenario {
            country: self.country.clone(),
            production: self.lcoh_input()?,
            transport_distance_km: self.distance_km()?,
            transport_mode: self.transport_mode,
        })
    }

    /// 폼을 제출해 생산단가, 운송비, 합계를 계산한다.
    pub fn submit(&self) -> Result<CostReport, FormError> {
        let scenario = self.to_scenario()?;
        let report = hydrogen::evaluate(&scenario).inspect_err(|e| {
            tracing::warn!(error = %e, "calculation rejected");
        })?;
        tracing::debug!(
            country = %report.country,
            mode = %report.transport_mode,
            lcoh = report.lcoh_per_kg(),
            transport = report.transport_cost_per_kg,
            total = report.total_cost_per_kg,
            "scenario evaluated"
        );
        Ok(report)
    }
}

/// 운송 방식의 표시 이름 번역 키.
pub fn mode_label_key(mode: TransportMode) -> &'static str {
    match mode {
        TransportMode::PipelineNew => keys::MODE_PIPELINE_NEW,
        TransportMode::PipelineRetrofit => keys::MODE_PIPELINE_RETROFIT,
        TransportMode::ShippingLh2 => keys::MODE_SHIPPING_LH2,
    }
}

/// 결과 머리글. 국가가 비어 있으면 국가 없이 표시한다.
pub fn report_header(report: &CostReport, tr: &Translator) -> String {
    if report.country.is_empty() {
        tr.t(keys::RESULT_HEADER_PLAIN)
    } else {
        tr.fill(keys::RESULT_HEADER, &[("country", report.country.clone())])
    }
}

/// 머리글과 LCOH / 운송비 / 합계 세 줄을 만든다.
pub fn render_report(report: &CostReport, tr: &Translator, currency: &str) -> Vec<String> {
    vec![
        report_header(report, tr),
        format!(
            "{} {}",
            tr.t(keys::RESULT_LCOH),
            hydrogen::format_per_kg(report.lcoh_per_kg(), currency)
        ),
        format!(
            "{} {}",
            tr.t(keys::RESULT_TRANSPORT),
            hydrogen::format_per_kg(report.transport_cost_per_kg, currency)
        ),
        format!(
            "{} {}",
            tr.t(keys::RESULT_TOTAL),
            hydrogen::format_per_kg(report.total_cost_per_kg, currency)
        ),
    ]
}

/// CRF, 고정비, 변동비, 생산단가 비중을 표시한다.
pub fn render_breakdown(report: &CostReport, tr: &Translator, currency: &str) -> Vec<String> {
    let p = &report.production;
    let mut lines = vec![
        format!("{} {:.5}", tr.t(keys::RESULT_CRF), p.capital_recovery_factor),
        format!(
            "{} {}",
            tr.t(keys::RESULT_FIXED),
            hydrogen::format_per_kg(p.fixed_costs, currency)
        ),
        format!(
            "{} {}",
            tr.t(keys::RESULT_VARIABLE),
            hydrogen::format_per_kg(p.variable_costs, currency)
        ),
    ];
    if let Some(share) = report.production_share() {
        lines.push(format!("{} {:.1}%", tr.t(keys::RESULT_SHARE), share * 100.0));
    }
    lines
}

/// 오류 메시지를 선택 언어로 옮긴다. `Display` 구현은 로그용으로 남겨 둔다.
pub fn describe_form_error(err: &FormError, tr: &Translator) -> String {
    match err {
        FormError::NotANumber { field } => {
            tr.fill(keys::ERROR_NOT_A_NUMBER, &[("field", field.to_string())])
        }
        FormError::BelowMinimum { field, value, min } => tr.fill(
            keys::ERROR_BELOW_MINIMUM,
            &[
                ("field", field.to_string()),
                ("value", value.to_string()),
                ("min", min.to_string()),
            ],
        ),
        FormError::AboveMaximum { field, value, max } => tr.fill(
            keys::ERROR_ABOVE_MAXIMUM,
            &[
                ("field", field.to_string()),
                ("value", value.to_string()),
                ("max", max.to_string()),
            ],
        ),
        FormError::Calculation(ScenarioError::Lcoh(e)) => describe_lcoh_error(e, tr),
        FormError::Calculation(ScenarioError::Transport(e)) => describe_transport_error(e, tr),
    }
}

pub fn describe_lcoh_error(err: &LcohError, tr: &Translator) -> String {
    match err {
        LcohError::EfficiencyOutOfRange(v) => {
            tr.fill(keys::ERROR_EFFICIENCY_RANGE, &[("value", v.to_string())])
        }
        LcohError::InvalidLifetime(v) => tr.fill(keys::ERROR_LIFETIME, &[("value", v.to_string())]),
        LcohError::WaccOutOfDomain(v) => {
            tr.fill(keys::ERROR_WACC_DOMAIN, &[("value", v.to_string())])
        }
        LcohError::Negative { field, value } => tr.fill(
            keys::ERROR_NEGATIVE,
            &[("field", field.to_string()), ("value", value.to_string())],
        ),
        LcohError::NonFinite(field) => {
            tr.fill(keys::ERROR_NON_FINITE, &[("field", field.to_string())])
        }
    }
}

pub fn describe_transport_error(err: &TransportError, tr: &Translator) -> String {
    match err {
        TransportError::UnknownMode(code) => {
            tr.fill(keys::ERROR_UNKNOWN_MODE, &[("mode", code.clone())])
        }
        TransportError::NegativeDistance(v) => {
            tr.fill(keys::ERROR_NEGATIVE_DISTANCE, &[("value", v.to_string())])
        }
        TransportError::NonFiniteDistance => tr.t(keys::ERROR_NON_FINITE_DISTANCE),
    }
}

pub fn describe_unit_error(err: &UnitParseError, tr: &Translator) -> String {
    match err {
        UnitParseError::Length(u) => tr.fill(keys::ERROR_UNKNOWN_LENGTH_UNIT, &[("unit", u.clone())]),
        UnitParseError::EnergyPrice(u) => {
            tr.fill(keys::ERROR_UNKNOWN_PRICE_UNIT, &[("unit", u.clone())])
        }
    }
}
