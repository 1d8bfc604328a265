//! 입력 단위 정의 및 변환 모듈 모음.
//! 계산 코어는 km, 통화/MWh 기준으로만 동작하므로 폼 경계에서 환산한다.

pub mod energy_price;
pub mod length;

pub use energy_price::{convert_energy_price, EnergyPriceUnit};
pub use length::{convert_length, LengthUnit};

/// 단위 문자열 해석 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitParseError {
    #[error("알 수 없는 거리 단위: {0}")]
    Length(String),
    #[error("알 수 없는 에너지 단가 단위: {0}")]
    EnergyPrice(String),
}
