//! Filter design and execution primitives for the polyphase filterbank
//!
//! - **Prototype design**: Kaiser-windowed sinc (Nyquist) or root raised
//!   cosine (root-Nyquist), `2·m·M + 1` taps
//! - **Polyphase decomposition**: mode-dependent split into M branches
//! - **FIR execution**: per-branch `push` / `execute` / `clear`
//!
//! ## Why root-Nyquist?
//!
//! When the same RRC prototype is used by the synthesizer and the analyzer,
//! the cascade is a raised cosine: zero ISI at symbol-spaced samples.

pub mod fir;
pub mod polyphase;
pub mod prototype;
pub mod pulse_shaping;
pub mod windows;

pub use fir::FirFilter;
pub use polyphase::decompose;
pub use prototype::design_prototype;
