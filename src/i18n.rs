use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_LCOH: &str = "main_menu.lcoh";
    pub const MAIN_MENU_TRANSPORT: &str = "main_menu.transport";
    pub const MAIN_MENU_FULL: &str = "main_menu.full";
    pub const MAIN_MENU_MODES: &str = "main_menu.modes";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_DEFAULT_HINT: &str = "prompt.default_hint";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const FIELD_COUNTRY: &str = "field.country";
    pub const FIELD_CAPEX: &str = "field.capex";
    pub const FIELD_OPEX: &str = "field.opex";
    pub const FIELD_EFFICIENCY: &str = "field.efficiency";
    pub const FIELD_WACC: &str = "field.wacc";
    pub const FIELD_LIFETIME: &str = "field.lifetime";
    pub const FIELD_ENERGY_PRICE: &str = "field.energy_price";
    pub const FIELD_DISTANCE: &str = "field.distance";
    pub const FIELD_MODE: &str = "field.mode";

    pub const LCOH_HEADING: &str = "lcoh.heading";
    pub const TRANSPORT_HEADING: &str = "transport.heading";
    pub const FULL_HEADING: &str = "full.heading";
    pub const MODES_HEADING: &str = "modes.heading";

    pub const MODE_PIPELINE_NEW: &str = "mode.pipeline_new";
    pub const MODE_PIPELINE_RETROFIT: &str = "mode.pipeline_retrofit";
    pub const MODE_SHIPPING_LH2: &str = "mode.shipping_lh2";

    pub const RESULT_HEADER: &str = "result.header";
    pub const RESULT_HEADER_PLAIN: &str = "result.header_plain";
    pub const RESULT_LCOH: &str = "result.lcoh";
    pub const RESULT_TRANSPORT: &str = "result.transport";
    pub const RESULT_TOTAL: &str = "result.total";
    pub const RESULT_CRF: &str = "result.crf";
    pub const RESULT_FIXED: &str = "result.fixed";
    pub const RESULT_VARIABLE: &str = "result.variable";
    pub const RESULT_SHARE: &str = "result.share";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_UNIT_SYSTEM: &str = "settings.current_unit_system";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const ERROR_INVALID_INTEGER: &str = "error.invalid_integer";
    pub const ERROR_EFFICIENCY_RANGE: &str = "error.efficiency_range";
    pub const ERROR_LIFETIME: &str = "error.lifetime";
    pub const ERROR_WACC_DOMAIN: &str = "error.wacc_domain";
    pub const ERROR_NEGATIVE: &str = "error.negative";
    pub const ERROR_NON_FINITE: &str = "error.non_finite";
    pub const ERROR_UNKNOWN_MODE: &str = "error.unknown_mode";
    pub const ERROR_NEGATIVE_DISTANCE: &str = "error.negative_distance";
    pub const ERROR_NON_FINITE_DISTANCE: &str = "error.non_finite_distance";
    pub const ERROR_NOT_A_NUMBER: &str = "error.not_a_number";
    pub const ERROR_BELOW_MINIMUM: &str = "error.below_minimum";
    pub const ERROR_ABOVE_MAXIMUM: &str = "error.above_maximum";
    pub const ERROR_UNKNOWN_LENGTH_UNIT: &str = "error.unknown_length_unit";
    pub const ERROR_UNKNOWN_PRICE_UNIT: &str = "error.unknown_price_unit";

    pub const HELP_LCOH: &str = "help.lcoh";
    pub const HELP_TRANSPORT: &str = "help.transport";
    pub const HELP_SETTINGS: &str = "help.settings";

    pub const GUI_CALCULATE: &str = "gui.calculate";
    pub const GUI_INPUTS: &str = "gui.inputs";
    pub const GUI_BREAKDOWN: &str = "gui.breakdown";
    pub const GUI_SETTINGS: &str = "gui.settings.title";
    pub const GUI_LANGUAGE: &str = "gui.settings.language";
    pub const GUI_UNIT_PRESET: &str = "gui.settings.unit_preset";
    pub const GUI_ALPHA: &str = "gui.settings.alpha";
    pub const GUI_SAVE: &str = "gui.settings.save";
    pub const GUI_SAVED: &str = "gui.settings.saved";
    pub const GUI_FORMULA: &str = "gui.formula.title";
    pub const GUI_FORMULA_CRF: &str = "gui.formula.crf";
    pub const GUI_FORMULA_LCOH: &str = "gui.formula.lcoh";
    pub const GUI_FORMULA_TRANSPORT: &str = "gui.formula.transport";
    pub const GUI_ABOUT: &str = "gui.about.title";
    pub const GUI_ABOUT_BODY: &str = "gui.about.body";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if overrides.is_some() {
            tracing::debug!(lang = lang_code, "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 영어 순으로 찾는다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.clone();
        }
        let s = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        s.unwrap_or("[missing translation]").to_string()
    }

    /// `{name}` 자리표시자를 채운 번역을 반환한다.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

/// 템플릿의 `{key}` 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [섹션] 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{lang}.toml"));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "수소 비용 계산기",
        MAIN_MENU_TITLE => "\n=== 수소 비용 계산기 ===",
        MAIN_MENU_LCOH => "1) 생산단가(LCOH)",
        MAIN_MENU_TRANSPORT => "2) 운송비",
        MAIN_MENU_FULL => "3) 전체 계산 (생산 + 운송)",
        MAIN_MENU_MODES => "4) 운송 방식 단가표",
        MAIN_MENU_SETTINGS => "5) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        PROMPT_DEFAULT_HINT => "(엔터 = {default})",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        FIELD_COUNTRY => "국가",
        FIELD_CAPEX => "CAPEX [통화/kW]",
        FIELD_OPEX => "OPEX [통화/kW·년]",
        FIELD_EFFICIENCY => "효율 (0-1)",
        FIELD_WACC => "WACC (0-1)",
        FIELD_LIFETIME => "수명 [년]",
        FIELD_ENERGY_PRICE => "전력 단가",
        FIELD_DISTANCE => "운송 거리",
        FIELD_MODE => "운송 방식",
        LCOH_HEADING => "\n-- 생산단가(LCOH) --",
        TRANSPORT_HEADING => "\n-- 운송비 --",
        FULL_HEADING => "\n-- 전체 계산 --",
        MODES_HEADING => "\n-- 운송 방식 단가 [통화/1000 km/kg H2] --",
        MODE_PIPELINE_NEW => "신규 배관",
        MODE_PIPELINE_RETROFIT => "기존 배관 전환",
        MODE_SHIPPING_LH2 => "액화수소 해상 운송",
        RESULT_HEADER => "### {country} 계산 결과",
        RESULT_HEADER_PLAIN => "### 계산 결과",
        RESULT_LCOH => "생산단가(LCOH):",
        RESULT_TRANSPORT => "운송비:",
        RESULT_TOTAL => "총 단가:",
        RESULT_CRF => "자본회수계수(CRF):",
        RESULT_FIXED => "고정비:",
        RESULT_VARIABLE => "변동비:",
        RESULT_SHARE => "생산단가 비중:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "현재 단위 시스템:",
        SETTINGS_OPTIONS => "1) Metric (km)  2) Imperial (mile)",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "단위 시스템이 변경되었습니다:",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        ERROR_INVALID_INTEGER => "1 이상의 정수를 입력하세요.",
        ERROR_EFFICIENCY_RANGE => "효율은 0보다 크고 1 이하여야 합니다 (입력: {value})",
        ERROR_LIFETIME => "수명은 1년 이상이어야 합니다 (입력: {value})",
        ERROR_WACC_DOMAIN => "WACC는 -1보다 커야 합니다 (입력: {value})",
        ERROR_NEGATIVE => "{field} 값은 0 이상이어야 합니다 (입력: {value})",
        ERROR_NON_FINITE => "{field} 값이 유한한 수가 아닙니다",
        ERROR_UNKNOWN_MODE => "지원하지 않는 운송 방식: {mode} (pipeline_new, pipeline_retrofit, shipping_LH2 중 선택)",
        ERROR_NEGATIVE_DISTANCE => "운송 거리는 0 이상이어야 합니다 (입력: {value})",
        ERROR_NON_FINITE_DISTANCE => "운송 거리가 유한한 수가 아닙니다",
        ERROR_NOT_A_NUMBER => "{field} 값이 숫자가 아닙니다",
        ERROR_BELOW_MINIMUM => "{field} 값은 {min} 이상이어야 합니다 (입력: {value})",
        ERROR_ABOVE_MAXIMUM => "{field} 값은 {max} 이하여야 합니다 (입력: {value})",
        ERROR_UNKNOWN_LENGTH_UNIT => "알 수 없는 거리 단위: {unit}",
        ERROR_UNKNOWN_PRICE_UNIT => "알 수 없는 에너지 단가 단위: {unit}",
        HELP_LCOH => "도움말: LCOH = CAPEX·CRF + OPEX + 전력단가/효율. WACC 0이면 CRF = 1/수명.",
        HELP_TRANSPORT => "도움말: 운송비 = 거리/1000 × 방식별 단가.",
        HELP_SETTINGS => "도움말: 단위 프리셋을 바꾸면 거리 입력 단위가 바뀝니다.",
        GUI_CALCULATE => "계산",
        GUI_INPUTS => "입력",
        GUI_BREAKDOWN => "항목별 분해",
        GUI_SETTINGS => "설정",
        GUI_LANGUAGE => "언어",
        GUI_UNIT_PRESET => "단위 프리셋",
        GUI_ALPHA => "창 투명도",
        GUI_SAVE => "설정 저장",
        GUI_SAVED => "저장되었습니다.",
        GUI_FORMULA => "공식 참고",
        GUI_FORMULA_CRF => "CRF = w(1+w)^n / ((1+w)^n - 1), w = 0이면 1/n",
        GUI_FORMULA_LCOH => "LCOH = CAPEX·CRF + OPEX + 전력단가/효율",
        GUI_FORMULA_TRANSPORT => "운송비 = 거리[km]/1000 × 단가",
        GUI_ABOUT => "도움말 / 정보",
        GUI_ABOUT_BODY => "수소 생산단가와 운송비를 계산하는 오프라인 계산기",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Hydrogen Cost Calculator",
        MAIN_MENU_TITLE => "\n=== Hydrogen Cost Calculator ===",
        MAIN_MENU_LCOH => "1) Production cost (LCOH)",
        MAIN_MENU_TRANSPORT => "2) Transport cost",
        MAIN_MENU_FULL => "3) Full calculation (production + transport)",
        MAIN_MENU_MODES => "4) Transport mode cost table",
        MAIN_MENU_SETTINGS => "5) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        PROMPT_DEFAULT_HINT => "(enter = {default})",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        FIELD_COUNTRY => "Country",
        FIELD_CAPEX => "CAPEX [$/kW]",
        FIELD_OPEX => "OPEX [$/kW-year]",
        FIELD_EFFICIENCY => "Efficiency (0-1)",
        FIELD_WACC => "WACC (0-1)",
        FIELD_LIFETIME => "Lifetime [years]",
        FIELD_ENERGY_PRICE => "Energy price",
        FIELD_DISTANCE => "Transport distance",
        FIELD_MODE => "Transport mode",
        LCOH_HEADING => "\n-- Production cost (LCOH) --",
        TRANSPORT_HEADING => "\n-- Transport cost --",
        FULL_HEADING => "\n-- Full calculation --",
        MODES_HEADING => "\n-- Transport unit costs [$/1000 km/kg H2] --",
        MODE_PIPELINE_NEW => "New pipeline",
        MODE_PIPELINE_RETROFIT => "Retrofitted pipeline",
        MODE_SHIPPING_LH2 => "Liquid H2 shipping",
        RESULT_HEADER => "### Results for {country}",
        RESULT_HEADER_PLAIN => "### Results",
        RESULT_LCOH => "LCOH:",
        RESULT_TRANSPORT => "Transport Cost:",
        RESULT_TOTAL => "Total Cost:",
        RESULT_CRF => "Capital recovery factor:",
        RESULT_FIXED => "Fixed costs:",
        RESULT_VARIABLE => "Variable costs:",
        RESULT_SHARE => "Production share:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_UNIT_SYSTEM => "Current unit system:",
        SETTINGS_OPTIONS => "1) Metric (km)  2) Imperial (mile)",
        SETTINGS_PROMPT_CHANGE => "Number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; unchanged.",
        SETTINGS_SAVED => "Unit system changed to:",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        ERROR_INVALID_INTEGER => "Please enter a whole number of at least 1.",
        ERROR_EFFICIENCY_RANGE => "Efficiency must be greater than 0 and at most 1 (got {value})",
        ERROR_LIFETIME => "Lifetime must be at least 1 year (got {value})",
        ERROR_WACC_DOMAIN => "WACC must be greater than -1 (got {value})",
        ERROR_NEGATIVE => "{field} must be at least 0 (got {value})",
        ERROR_NON_FINITE => "{field} is not a finite number",
        ERROR_UNKNOWN_MODE => "Unsupported transport mode: {mode} (choose pipeline_new, pipeline_retrofit or shipping_LH2)",
        ERROR_NEGATIVE_DISTANCE => "Transport distance must be at least 0 (got {value})",
        ERROR_NON_FINITE_DISTANCE => "Transport distance is not a finite number",
        ERROR_NOT_A_NUMBER => "{field} is not a number",
        ERROR_BELOW_MINIMUM => "{field} must be at least {min} (got {value})",
        ERROR_ABOVE_MAXIMUM => "{field} must be at most {max} (got {value})",
        ERROR_UNKNOWN_LENGTH_UNIT => "Unknown distance unit: {unit}",
        ERROR_UNKNOWN_PRICE_UNIT => "Unknown energy price unit: {unit}",
        HELP_LCOH => "Help: LCOH = CAPEX*CRF + OPEX + energy price/efficiency. With WACC 0, CRF = 1/lifetime.",
        HELP_TRANSPORT => "Help: transport cost = distance/1000 x unit cost of the mode.",
        HELP_SETTINGS => "Help: the unit preset changes the distance input unit.",
        GUI_CALCULATE => "Calculate",
        GUI_INPUTS => "Inputs",
        GUI_BREAKDOWN => "Breakdown",
        GUI_SETTINGS => "Settings",
        GUI_LANGUAGE => "Language",
        GUI_UNIT_PRESET => "Unit preset",
        GUI_ALPHA => "Window transparency",
        GUI_SAVE => "Save settings",
        GUI_SAVED => "Saved.",
        GUI_FORMULA => "Formula reference",
        GUI_FORMULA_CRF => "CRF = w(1+w)^n / ((1+w)^n - 1), 1/n when w = 0",
        GUI_FORMULA_LCOH => "LCOH = CAPEX*CRF + OPEX + energy price/efficiency",
        GUI_FORMULA_TRANSPORT => "Transport = distance[km]/1000 x unit cost",
        GUI_ABOUT => "Help / About",
        GUI_ABOUT_BODY => "Offline calculator for hydrogen production and transport cost",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_english_key_has_korean() {
        use keys::*;
        for key in [
            APP_TITLE,
            RESULT_HEADER,
            GUI_FORMULA_CRF,
            MODE_SHIPPING_LH2,
            ERROR_UNKNOWN_MODE,
            ERROR_ABOVE_MAXIMUM,
        ] {
            assert!(en(key).is_some());
            assert!(ko(key).is_some());
        }
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-us")), "en");
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[result]\nlcoh = \"Produktion:\"\n").unwrap();
        assert_eq!(map.get("result.lcoh").map(String::as_str), Some("Produktion:"));
    }

    #[test]
    fn fill_replaces_placeholders() {
        let tr = Translator::new("en");
        let s = tr.fill(keys::RESULT_HEADER, &[("country", "Chile".into())]);
        assert_eq!(s, "### Results for Chile");
    }
}
