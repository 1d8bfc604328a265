use serde::{Deserialize, Serialize};

use super::UnitParseError;

/// 운송 거리 단위. 내부 기준은 킬로미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Meter,
    Kilometer,
    Mile,
    NauticalMile,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Kilometer,
        LengthUnit::Meter,
        LengthUnit::Mile,
        LengthUnit::NauticalMile,
    ];

    /// 화면/CLI 표기용 기호.
    pub fn symbol(self) -> &'static str {
        match self {
            LengthUnit::Meter => "m",
            LengthUnit::Kilometer => "km",
            LengthUnit::Mile => "mi",
            LengthUnit::NauticalMile => "nmi",
        }
    }
}

impl std::str::FromStr for LengthUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meter" => Ok(LengthUnit::Meter),
            "km" | "kilometer" => Ok(LengthUnit::Kilometer),
            "mi" | "mile" => Ok(LengthUnit::Mile),
            "nmi" | "nm" | "nautical_mile" => Ok(LengthUnit::NauticalMile),
            _ => Err(UnitParseError::Length(s.to_string())),
        }
    }
}

fn to_kilometer(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Meter => value / 1000.0,
        LengthUnit::Kilometer => value,
        LengthUnit::Mile => value * 1.609344,
        LengthUnit::NauticalMile => value * 1.852,
    }
}

fn from_kilometer(value_km: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Meter => value_km * 1000.0,
        LengthUnit::Kilometer => value_km,
        LengthUnit::Mile => value_km / 1.609344,
        LengthUnit::NauticalMile => value_km / 1.852,
    }
}

/// 거리를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let km = to_kilometer(value, from);
    from_kilometer(km, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mile_to_km() {
        let km = convert_length(100.0, LengthUnit::Mile, LengthUnit::Kilometer);
        assert!((km - 160.9344).abs() < 1e-9);
    }

    #[test]
    fn parse_accepts_symbols() {
        assert_eq!("NMI".parse::<LengthUnit>().unwrap(), LengthUnit::NauticalMile);
        assert!("furlong".parse::<LengthUnit>().is_err());
    }
}
