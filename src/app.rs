use std::io;
use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::form::{self, FormError};
use crate::hydrogen::{LcohError, TransportError};
use crate::i18n::{keys, Translator};
use crate::ui_cli::{self, MenuChoice};
use crate::units::UnitParseError;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    #[error("단위 오류: {0}")]
    Unit(#[from] UnitParseError),
    #[error("입력 오류: {0}")]
    Form(#[from] FormError),
    #[error("생산단가 계산 오류: {0}")]
    Lcoh(#[from] LcohError),
    #[error("운송비 계산 오류: {0}")]
    Transport(#[from] TransportError),
}

impl AppError {
    /// 입력 스트림이 닫혀 더 읽을 수 없는 경우.
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, AppError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }

    /// 사용자에게 보여줄 메시지. 계산 오류는 선택 언어로 표시한다.
    pub fn localized(&self, tr: &Translator) -> String {
        match self {
            AppError::Form(e) => form::describe_form_error(e, tr),
            AppError::Lcoh(e) => form::describe_lcoh_error(e, tr),
            AppError::Transport(e) => form::describe_transport_error(e, tr),
            AppError::Unit(e) => form::describe_unit_error(e, tr),
            AppError::Io(_) | AppError::Config(_) => self.to_string(),
        }
    }
}

/// CLI 대화형 메인 루프를 실행한다. 설정 변경은 `config_path`에 저장한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &Translator) -> Result<(), AppError> {
    match run_menu(config, config_path, tr) {
        Err(e) if e.is_end_of_input() => {
            tracing::debug!("stdin closed, leaving menu");
            println!();
            println!("{}", tr.t(keys::APP_EXIT));
            Ok(())
        }
        other => other,
    }
}

fn run_menu(config: &mut Config, config_path: &Path, tr: &Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Lcoh => ui_cli::handle_lcoh(tr, config)?,
            MenuChoice::Transport => ui_cli::handle_transport(tr, config)?,
            MenuChoice::Full => ui_cli::handle_full(tr, config)?,
            MenuChoice::Modes => ui_cli::print_modes(tr, &config.currency_symbol),
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save_to(config_path)?;
            }
            MenuChoice::Exit => {
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
