pub mod alert;
pub mod button;
pub mod card;
pub mod checkbox;
pub mod dialog;
pub mod input;
pub mod label;
pub mod pagination;
pub mod select;
pub mod spinner;
pub mod switch;
pub mod textarea;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use alert::*;
pub use button::*;
#[allow(unused_imports)]
pub use card::*;
pub use checkbox::*;
pub use dialog::*;
pub use input::*;
pub use label::*;
pub use pagination::*;
pub use select::*;
pub use spinner::*;
pub use switch::*;
pub use textarea::*;
