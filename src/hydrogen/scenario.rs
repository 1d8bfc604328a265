use super::lcoh::{compute_lcoh, LcohError, LcohInput, LcohResult};
use super::transport::{transport_cost, TransportError, TransportMode};

/// 생산 + 운송을 묶은 단일 계산 요청.
#[derive(Debug, Clone, PartialEq)]
pub struct CostScenario {
    /// 결과 머리글에만 쓰이는 국가/라벨. 계산에는 영향이 없다.
    pub country: String,
    pub production: LcohInput,
    pub transport_distance_km: f64,
    pub transport_mode: TransportMode,
}

/// 시나리오 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct CostReport {
    pub country: String,
    pub transport_mode: TransportMode,
    pub production: LcohResult,
    /// 운송비 [통화/kg]
    pub transport_cost_per_kg: f64,
    /// 총 공급단가 = LCOH + 운송비 [통화/kg]
    pub total_cost_per_kg: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScenarioError {
    #[error("생산단가 계산 오류: {0}")]
    Lcoh(#[from] LcohError),
    #[error("운송비 계산 오류: {0}")]
    Transport(#[from] TransportError),
}

/// 두 계산기를 각각 호출해 합산한다.
pub fn evaluate(scenario: &CostScenario) -> Result<CostReport, ScenarioError> {
    let production = compute_lcoh(&scenario.production)?;
    let transport = transport_cost(scenario.transport_distance_km, scenario.transport_mode)?;
    Ok(CostReport {
        country: scenario.country.trim().to_string(),
        transport_mode: scenario.transport_mode,
        production,
        transport_cost_per_kg: transport,
        total_cost_per_kg: production.lcoh_per_kg + transport,
    })
}

impl CostReport {
    pub fn lcoh_per_kg(&self) -> f64 {
        self.production.lcoh_per_kg
    }

    /// 총 단가 중 생산단가 비중(0~1). 총 단가가 0이면 None.
    pub fn production_share(&self) -> Option<f64> {
        if self.total_cost_per_kg > 0.0 {
            Some(self.production.lcoh_per_kg / self.total_cost_per_kg)
        } else {
            None
        }
    }
}

/// kg당 단가를 소수 둘째 자리까지 표기한다. 예: `$180.07/kg`
pub fn format_per_kg(value: f64, currency: &str) -> String {
    format!("{currency}{value:.2}/kg")
}
