pub mod hgbrasil;

pub use hgbrasil::HgBrasilProvider;
