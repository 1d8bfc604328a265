/// 수소 균등화 생산단가(LCOH) 계산 입력.
#[derive(Debug, Clone, PartialEq)]
pub struct LcohInput {
    /// 설비 투자비 [통화/kW]
    pub capex_per_kw: f64,
    /// 연간 운전비 [통화/kW·년]
    pub opex_per_kw_year: f64,
    /// 변환 효율(0~1]
    pub efficiency: f64,
    /// 가중평균자본비용(소수). 코어는 -1 초과 전 구간을 허용한다.
    pub wacc: f64,
    /// 설비 수명 [년]
    pub lifetime_years: u32,
    /// 전력 단가 [통화/MWh]
    pub energy_price_per_mwh: f64,
}

/// LCOH 계산 결과 및 항목별 분해.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LcohResult {
    /// 자본회수계수(CRF)
    pub capital_recovery_factor: f64,
    /// 고정비 = CAPEX·CRF + OPEX
    pub fixed_costs: f64,
    /// 변동비 = 전력 단가 / 효율
    pub variable_costs: f64,
    /// LCOH [통화/kg]
    pub lcoh_per_kg: f64,
}

/// 정의역을 벗어난 입력 조합.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LcohError {
    #[error("효율은 0보다 크고 1 이하여야 합니다 (입력: {0})")]
    EfficiencyOutOfRange(f64),
    #[error("수명은 1년 이상이어야 합니다 (입력: {0})")]
    InvalidLifetime(u32),
    #[error("WACC는 -1보다 커야 합니다 (입력: {0})")]
    WaccOutOfDomain(f64),
    #[error("{field} 값은 0 이상이어야 합니다 (입력: {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{0} 값이 유한한 수가 아닙니다")]
    NonFinite(&'static str),
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, LcohError> {
    if !value.is_finite() {
        return Err(LcohError::NonFinite(field));
    }
    if value < 0.0 {
        return Err(LcohError::Negative { field, value });
    }
    Ok(value)
}

/// 자본회수계수 CRF = w(1+w)^n / ((1+w)^n - 1).
///
/// `wacc == 0`이면 분모가 0이 되므로 극한값 `1/n`을 반환한다.
/// `(1+w)^n - 1`은 `exp_m1(n·ln_1p(w))`로 계산해 w가 0 근처일 때의 상쇄 오차를 피한다.
pub fn capital_recovery_factor(wacc: f64, lifetime_years: u32) -> Result<f64, LcohError> {
    if lifetime_years < 1 {
        return Err(LcohError::InvalidLifetime(lifetime_years));
    }
    if !wacc.is_finite() {
        return Err(LcohError::NonFinite("wacc"));
    }
    if wacc <= -1.0 {
        return Err(LcohError::WaccOutOfDomain(wacc));
    }
    let n = f64::from(lifetime_years);
    if wacc == 0.0 {
        return Ok(1.0 / n);
    }
    let growth_minus_one = (n * wacc.ln_1p()).exp_m1();
    if growth_minus_one == 0.0 {
        return Ok(1.0 / n);
    }
    if growth_minus_one.is_infinite() {
        // n → ∞ 극한에서 CRF → w
        return Ok(wacc);
    }
    let crf = wacc * (growth_minus_one + 1.0) / growth_minus_one;
    if !crf.is_finite() {
        return Err(LcohError::NonFinite("capital_recovery_factor"));
    }
    Ok(crf)
}

/// LCOH를 계산하고 CRF/고정비/변동비 분해를 함께 반환한다.
pub fn compute_lcoh(input: &LcohInput) -> Result<LcohResult, LcohError> {
    let capex = non_negative("capex", input.capex_per_kw)?;
    let opex = non_negative("opex", input.opex_per_kw_year)?;
    let energy_price = non_negative("energy_price", input.energy_price_per_mwh)?;
    if !input.efficiency.is_finite() {
        return Err(LcohError::NonFinite("efficiency"));
    }
    if input.efficiency <= 0.0 || input.efficiency > 1.0 {
        return Err(LcohError::EfficiencyOutOfRange(input.efficiency));
    }

    let crf = capital_recovery_factor(input.wacc, input.lifetime_years)?;
    let fixed_costs = capex * crf + opex;
    let variable_costs = energy_price / input.efficiency;
    let lcoh_per_kg = fixed_costs + variable_costs;
    if !lcoh_per_kg.is_finite() {
        return Err(LcohError::NonFinite("lcoh"));
    }
    Ok(LcohResult {
        capital_recovery_factor: crf,
        fixed_costs,
        variable_costs,
        lcoh_per_kg,
    })
}

/// 여섯 개 스칼라 입력으로 LCOH [통화/kg]만 반환한다.
pub fn levelized_cost(
    capex: f64,
    opex: f64,
    efficiency: f64,
    wacc: f64,
    lifetime_years: u32,
    energy_price: f64,
) -> Result<f64, LcohError> {
    let input = LcohInput {
        capex_per_kw: capex,
        opex_per_kw_year: opex,
        efficiency,
        wacc,
        lifetime_years,
        energy_price_per_mwh: energy_price,
    };
    compute_lcoh(&input).map(|r| r.lcoh_per_kg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_wacc_uses_limit() {
        assert_eq!(capital_recovery_factor(0.0, 25).unwrap(), 0.04);
        assert_eq!(capital_recovery_factor(0.0, 1).unwrap(), 1.0);
    }

    #[test]
    fn single_year_crf_is_one_plus_rate() {
        let crf = capital_recovery_factor(0.08, 1).unwrap();
        assert!((crf - 1.08).abs() < 1e-12);
    }

    #[test]
    fn negative_wacc_above_minus_one_is_defined() {
        let crf = capital_recovery_factor(-0.5, 1).unwrap();
        assert!((crf - 0.5).abs() < 1e-12);
        assert_eq!(
            capital_recovery_factor(-1.0, 10),
            Err(LcohError::WaccOutOfDomain(-1.0))
        );
    }

    #[test]
    fn huge_lifetime_converges_to_rate() {
        let crf = capital_recovery_factor(0.5, u32::MAX).unwrap();
        assert!((crf - 0.5).abs() < 1e-12);
    }

    #[test]
    fn efficiency_above_one_rejected() {
        let err = levelized_cost(900.0, 20.0, 1.2, 0.08, 25, 50.0).unwrap_err();
        assert_eq!(err, LcohError::EfficiencyOutOfRange(1.2));
    }
}
