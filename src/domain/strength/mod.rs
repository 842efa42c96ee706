//! Strength Module - Pure formulas for one-rep max and rep weight.
//!
//! Stateless functions over validated inputs. No ports or adapters are
//! involved; the dialogue engine calls these at the end of each flow.

mod formulas;
mod values;

pub use formulas::{StrengthCalculator, ACCURATE_MAX_REPS, ACCURATE_MAX_SETS};
pub use values::{Category, Weight};
