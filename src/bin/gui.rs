#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use hydrogen_cost_calculator::{
    config,
    form::{self, CalculatorForm, Field},
    hydrogen::{CostReport, TransportMode},
    i18n::{self, keys},
    units::{EnergyPriceUnit, LengthUnit},
};
use image::GenericImageView;
use std::{env, fs, path::Path};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), eframe::Error> {
    init_tracing();
    // --lang xx 또는 --lang=xx (xx: auto/en/ko)
    let cli_lang = parse_lang_arg(env::args().skip(1));

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(760.0, 640.0))
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Hydrogen Cost Calculator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!(error = %e, "font setup failed");
            }
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_lang_arg(args: impl IntoIterator<Item = String>) -> Option<String> {
    let mut lang = None;
    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        if let Some(val) = a.strip_prefix("--lang=") {
            lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if let Some(val) = args.next() {
                lang = Some(val);
            }
        }
    }
    lang
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    // 기본 폰트 뒤에 두어 한글만 대체 폰트로 그린다.
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(font_name.clone());
    }
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾아 등록한다.
/// 1) assets/fonts/ 2) Windows 시스템 폰트 3) 리눅스/맥 공용 CJK 폰트 순.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![
        Path::new("assets/fonts/malgun.ttf").to_path_buf(),
        Path::new("assets/fonts/NanumGothic.ttf").to_path_buf(),
    ];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .iter()
        .map(|p| Path::new(p).to_path_buf()),
    );

    let found = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "Korean font not found; Hangul labels may not render.".to_string())?;
    let bytes = fs::read(found)
        .map_err(|e| format!("Failed to read font file ({}): {e}", found.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    Ok(())
}

/// 폼 필드 범위를 그대로 DragValue 제한으로 사용한다.
fn field_drag(ui: &mut egui::Ui, value: &mut f64, field: Field, speed: f64) -> egui::Response {
    let (min, max) = field.range();
    ui.add(
        egui::DragValue::new(value)
            .speed(speed)
            .clamp_range(min..=max.unwrap_or(f64::INFINITY)),
    )
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    form: CalculatorForm,
    result: Option<Result<CostReport, String>>,
    lang_input: String,
    save_status: Option<String>,
    window_alpha: f32,
    show_settings_modal: bool,
    show_formula_modal: bool,
    show_help_modal: bool,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        tracing::info!(lang = %lang_code, "gui language resolved");
        Self {
            form: CalculatorForm::from_config(&config),
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            config,
            tr,
            result: None,
            save_status: None,
            show_settings_modal: false,
            show_formula_modal: false,
            show_help_modal: false,
        }
    }

    /// 단위 시스템 프리셋을 설정과 폼 표시 단위에 적용한다.
    fn apply_unit_preset(&mut self, system: config::UnitSystem) {
        self.config.apply_unit_system(system);
        self.form.set_distance_unit(self.config.default_units.distance);
        self.form
            .set_energy_price_unit(self.config.default_units.energy_price);
    }

    fn calculate(&mut self) {
        self.result = Some(
            self.form
                .submit()
                .map_err(|e| form::describe_form_error(&e, &self.tr)),
        );
    }

    fn save_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        self.config.window_alpha = self.window_alpha;
        let resolved = i18n::resolve_language("auto", Some(self.config.language.as_str()));
        self.tr =
            i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
        self.save_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::GUI_SAVED),
            Err(e) => {
                tracing::warn!(error = %e, "settings save failed");
                format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX))
            }
        });
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::GUI_INPUTS));
        ui.add_space(6.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::Grid::new("form_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(tr.t(keys::FIELD_COUNTRY));
                    ui.text_edit_singleline(&mut self.form.country);
                    ui.end_row();

                    ui.label(tr.t(keys::FIELD_CAPEX));
                    field_drag(ui, &mut self.form.capex_per_kw, Field::Capex, 10.0);
                    ui.end_row();

                    ui.label(tr.t(keys::FIELD_OPEX));
                    field_drag(ui, &mut self.form.opex_per_kw_year, Field::Opex, 1.0);
                    ui.end_row();

                    ui.label(tr.t(keys::FIELD_EFFICIENCY));
                    field_drag(ui, &mut self.form.efficiency, Field::Efficiency, 0.01);
                    ui.end_row();

                    ui.label(tr.t(keys::FIELD_WACC));
                    field_drag(ui, &mut self.form.wacc, Field::Wacc, 0.005);
                    ui.end_row();

                    ui.label(tr.t(keys::FIELD_LIFETIME));
                    ui.add(
                        egui::DragValue::new(&mut self.form.lifetime_years)
                            .speed(1.0)
                            .clamp_range(1..=u32::MAX),
                    );
                    ui.end_row();

                    ui.label(tr.t(keys::FIELD_ENERGY_PRICE));
                    ui.horizontal(|ui| {
                        field_drag(ui, &mut self.form.energy_price, Field::EnergyPrice, 1.0);
                        let mut unit = self.form.energy_price_unit;
                        egui::ComboBox::from_id_source("price_unit")
                            .selected_text(format!("{}{}", self.config.currency_symbol, unit.symbol()))
                            .show_ui(ui, |ui| {
                                for u in EnergyPriceUnit::ALL {
                                    let label = format!("{}{}", self.config.currency_symbol, u.symbol());
                                    ui.selectable_value(&mut unit, u, label);
                                }
                            });
                        if unit != self.form.energy_price_unit {
                            self.form.set_energy_price_unit(unit);
                        }
                    });
                    ui.end_row();

                    ui.label(tr.t(keys::FIELD_DISTANCE));
                    ui.horizontal(|ui| {
                        field_drag(ui, &mut self.form.transport_distance, Field::Distance, 10.0);
                        let mut unit = self.form.distance_unit;
                        egui::ComboBox::from_id_source("distance_unit")
                            .selected_text(unit.symbol())
                            .show_ui(ui, |ui| {
                                for u in LengthUnit::ALL {
                                    ui.selectable_value(&mut unit, u, u.symbol());
                                }
                            });
                        if unit != self.form.distance_unit {
                            self.form.set_distance_unit(unit);
                        }
                    });
                    ui.end_row();

                    label_with_tip(ui, &tr.t(keys::FIELD_MODE), &tr.t(keys::HELP_TRANSPORT));
                    egui::ComboBox::from_id_source("transport_mode")
                        .selected_text(tr.t(form::mode_label_key(self.form.transport_mode)))
                        .show_ui(ui, |ui| {
                            for mode in TransportMode::ALL {
                                let label = format!(
                                    "{} ({}{:.2})",
                                    tr.t(form::mode_label_key(mode)),
                                    self.config.currency_symbol,
                                    mode.unit_cost_per_1000km()
                                );
                                ui.selectable_value(&mut self.form.transport_mode, mode, label);
                            }
                        });
                    ui.end_row();
                });
        });
        ui.add_space(8.0);
        if ui
            .add(egui::Button::new(tr.t(keys::GUI_CALCULATE)).min_size(egui::vec2(120.0, 32.0)))
            .clicked()
        {
            self.calculate();
        }
    }

    fn ui_result(&self, ui: &mut egui::Ui) {
        let Some(result) = &self.result else {
            return;
        };
        ui.separator();
        match result {
            Ok(report) => {
                let currency = &self.config.currency_symbol;
                let mut lines = form::render_report(report, &self.tr, currency).into_iter();
                if let Some(header) = lines.next() {
                    ui.heading(header.trim_start_matches('#').trim());
                }
                for line in lines {
                    ui.label(egui::RichText::new(line).strong());
                }
                egui::CollapsingHeader::new(self.tr.t(keys::GUI_BREAKDOWN))
                    .default_open(false)
                    .show(ui, |ui| {
                        for line in form::render_breakdown(report, &self.tr, currency) {
                            ui.label(line);
                        }
                    });
            }
            Err(msg) => {
                ui.colored_label(
                    egui::Color32::from_rgb(200, 60, 60),
                    format!("{}: {msg}", self.tr.t(keys::ERROR_PREFIX)),
                );
            }
        }
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.label(tr.t(keys::GUI_UNIT_PRESET));
        let mut system = self.config.unit_system;
        ui.horizontal(|ui| {
            ui.selectable_value(&mut system, config::UnitSystem::Metric, "Metric (km)");
            ui.selectable_value(&mut system, config::UnitSystem::Imperial, "Imperial (mi)");
        });
        if system != self.config.unit_system {
            self.apply_unit_preset(system);
        }
        ui.separator();
        ui.label(tr.t(keys::GUI_ALPHA));
        ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
        ui.separator();
        ui.label(format!("{} ({})", tr.t(keys::GUI_LANGUAGE), tr.language_code()));
        egui::ComboBox::from_id_source("lang_choice")
            .selected_text(self.lang_input.clone())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.lang_input, "auto".into(), "System");
                ui.selectable_value(&mut self.lang_input, "en".into(), "English");
                ui.selectable_value(&mut self.lang_input, "ko".into(), "한국어");
            });
        if ui.button(tr.t(keys::GUI_SAVE)).clicked() {
            self.save_settings();
        }
        if let Some(msg) = &self.save_status {
            ui.label(msg);
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(tr.t(keys::GUI_FORMULA)).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(tr.t(keys::GUI_ABOUT)).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            let mut open = true;
            egui::Window::new(tr.t(keys::GUI_SETTINGS))
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| self.ui_settings(ui));
            self.show_settings_modal = open;
        }

        if self.show_formula_modal {
            egui::Window::new(tr.t(keys::GUI_FORMULA))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.label(tr.t(keys::GUI_FORMULA_CRF));
                    ui.label(tr.t(keys::GUI_FORMULA_LCOH));
                    ui.separator();
                    ui.label(tr.t(keys::GUI_FORMULA_TRANSPORT));
                });
        }

        if self.show_help_modal {
            egui::Window::new(tr.t(keys::GUI_ABOUT))
                .collapsible(false)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(tr.t(keys::GUI_ABOUT_BODY));
                    ui.label(format!("Version: {}", env!("CARGO_PKG_VERSION")));
                    ui.separator();
                    ui.label(tr.t(keys::HELP_LCOH));
                    ui.label(tr.t(keys::HELP_TRANSPORT));
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.ui_form(ui);
                    self.ui_result(ui);
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_starts_from_config_defaults() {
        let app = GuiApp::new(config::Config::default());
        assert_eq!(app.form.capex_per_kw, 900.0);
        assert_eq!(app.form.lifetime_years, 25);
        assert_eq!(app.form.distance_unit, LengthUnit::Kilometer);
        assert_eq!(app.form.transport_mode, TransportMode::PipelineNew);
        assert!(app.result.is_none());
    }

    #[test]
    fn imperial_preset_converts_distance_to_miles() {
        let mut app = GuiApp::new(config::Config::default());
        app.apply_unit_preset(config::UnitSystem::Imperial);
        assert_eq!(app.form.distance_unit, LengthUnit::Mile);
        assert!((app.form.transport_distance - 1242.742).abs() < 1e-3);
        assert!((app.form.distance_km().unwrap() - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn calculate_with_defaults_sums_both_legs() {
        let mut app = GuiApp::new(config::Config::default());
        app.calculate();
        let report = app.result.as_ref().unwrap().as_ref().unwrap();
        assert!((report.lcoh_per_kg() - 180.07).abs() < 0.1);
        assert!((report.transport_cost_per_kg - 1.28).abs() < 1e-9);
        assert!((report.total_cost_per_kg - 181.35).abs() < 0.1);
    }

    #[test]
    fn zero_efficiency_is_shown_as_error() {
        let mut app = GuiApp::new(config::Config::default());
        app.form.efficiency = 0.0;
        app.calculate();
        assert!(matches!(app.result, Some(Err(_))));
    }

    #[test]
    fn errors_and_language_follow_config() {
        let cfg = config::Config {
            language: "en".into(),
            ..config::Config::default()
        };
        let mut app = GuiApp::new(cfg);
        assert_eq!(app.tr.language_code(), "en");
        app.form.efficiency = 1.5;
        app.calculate();
        let Some(Err(msg)) = &app.result else {
            panic!("expected a range error");
        };
        assert!(msg.starts_with("efficiency must be at most 1"), "{msg}");
    }

    #[test]
    fn lang_arg_forms() {
        let args = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(parse_lang_arg(args(&["--lang=ko"])), Some("ko".into()));
        assert_eq!(parse_lang_arg(args(&["-L", "en"])), Some("en".into()));
        assert_eq!(parse_lang_arg(args(&["--lang"])), None);
    }
}
