use serde::{Deserialize, Serialize};

/// 수소 운송 방식. 닫힌 집합이므로 단가 조회는 항상 완전 매칭된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransportMode {
    /// 신규 배관
    #[serde(rename = "pipeline_new")]
    PipelineNew,
    /// 기존 가스배관 전환
    #[serde(rename = "pipeline_retrofit")]
    PipelineRetrofit,
    /// 액화수소(LH2) 해상 운송
    #[serde(rename = "shipping_LH2")]
    ShippingLh2,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [
        TransportMode::PipelineNew,
        TransportMode::PipelineRetrofit,
        TransportMode::ShippingLh2,
    ];

    /// 운송 단가 [통화 / 1000 km / kg H2]
    pub fn unit_cost_per_1000km(self) -> f64 {
        match self {
            TransportMode::PipelineNew => 0.64,
            TransportMode::PipelineRetrofit => 0.13,
            TransportMode::ShippingLh2 => 1.5,
        }
    }

    /// 설정 파일과 CLI에서 쓰는 표준 코드.
    pub fn code(self) -> &'static str {
        match self {
            TransportMode::PipelineNew => "pipeline_new",
            TransportMode::PipelineRetrofit => "pipeline_retrofit",
            TransportMode::ShippingLh2 => "shipping_LH2",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for TransportMode {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        TransportMode::ALL
            .into_iter()
            .find(|m| m.code() == code)
            .ok_or_else(|| TransportError::UnknownMode(code.to_string()))
    }
}

/// 운송비 계산 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    /// 지원하지 않는 운송 방식. 0원 운송으로 대체하지 않는다.
    #[error("지원하지 않는 운송 방식: {0} (pipeline_new, pipeline_retrofit, shipping_LH2 중 선택)")]
    UnknownMode(String),
    #[error("운송 거리는 0 이상이어야 합니다 (입력: {0})")]
    NegativeDistance(f64),
    #[error("운송 거리가 유한한 수가 아닙니다")]
    NonFiniteDistance,
}

/// 운송 거리[km]와 방식으로 kg당 운송비를 계산한다.
pub fn transport_cost(distance_km: f64, mode: TransportMode) -> Result<f64, TransportError> {
    if !distance_km.is_finite() {
        return Err(TransportError::NonFiniteDistance);
    }
    if distance_km < 0.0 {
        return Err(TransportError::NegativeDistance(distance_km));
    }
    Ok(distance_km / 1000.0 * mode.unit_cost_per_1000km())
}

/// 문자열 코드로 운송 방식을 지정해 운송비를 계산한다.
pub fn transport_cost_by_code(distance_km: f64, mode: &str) -> Result<f64, TransportError> {
    let mode: TransportMode = mode.parse()?;
    transport_cost(distance_km, mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip_through_from_str() {
        for mode in TransportMode::ALL {
            assert_eq!(mode.code().parse::<TransportMode>().unwrap(), mode);
        }
    }

    #[test]
    fn code_match_is_case_sensitive() {
        assert!("shipping_lh2".parse::<TransportMode>().is_err());
    }

    #[test]
    fn zero_distance_costs_nothing() {
        assert_eq!(transport_cost(0.0, TransportMode::ShippingLh2).unwrap(), 0.0);
    }
}
