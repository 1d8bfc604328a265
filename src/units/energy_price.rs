use serde::{Deserialize, Serialize};

use super::UnitParseError;

/// 에너지 단가 단위. 내부 기준은 통화/MWh 이다.
///
/// 단가는 에너지 양의 역수로 환산되므로 kWh 기준 단가는 1000배가 된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyPriceUnit {
    PerMegawattHour,
    PerKilowattHour,
    PerGigajoule,
}

impl EnergyPriceUnit {
    pub const ALL: [EnergyPriceUnit; 3] = [
        EnergyPriceUnit::PerMegawattHour,
        EnergyPriceUnit::PerKilowattHour,
        EnergyPriceUnit::PerGigajoule,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            EnergyPriceUnit::PerMegawattHour => "/MWh",
            EnergyPriceUnit::PerKilowattHour => "/kWh",
            EnergyPriceUnit::PerGigajoule => "/GJ",
        }
    }

    /// 해당 단위 1에 들어있는 MWh 양.
    fn mwh_per_unit(self) -> f64 {
        match self {
            EnergyPriceUnit::PerMegawattHour => 1.0,
            EnergyPriceUnit::PerKilowattHour => 0.001,
            // 1 GJ = 1/3.6 MWh
            EnergyPriceUnit::PerGigajoule => 1.0 / 3.6,
        }
    }
}

impl std::str::FromStr for EnergyPriceUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim().trim_start_matches('/').to_lowercase();
        match c.as_str() {
            "mwh" | "per_mwh" => Ok(EnergyPriceUnit::PerMegawattHour),
            "kwh" | "per_kwh" => Ok(EnergyPriceUnit::PerKilowattHour),
            "gj" | "per_gj" => Ok(EnergyPriceUnit::PerGigajoule),
            _ => Err(UnitParseError::EnergyPrice(s.to_string())),
        }
    }
}

/// 에너지 단가를 다른 단위로 변환한다.
pub fn convert_energy_price(value: f64, from: EnergyPriceUnit, to: EnergyPriceUnit) -> f64 {
    let per_mwh = value / from.mwh_per_unit();
    per_mwh * to.mwh_per_unit()
}
