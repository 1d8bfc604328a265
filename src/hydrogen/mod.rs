//! 수소 생산단가(LCOH)와 운송비 계산 모듈 모음.
//! 두 계산기는 서로 독립적인 순수 함수이며 합산은 호출자(`scenario`)가 담당한다.

pub mod lcoh;
pub mod scenario;
pub mod transport;

pub use lcoh::*;
pub use scenario::*;
pub use transport::*;
