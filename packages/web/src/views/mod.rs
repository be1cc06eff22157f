mod login;
pub use login::Login;

mod protected;
pub use protected::Protected;

mod calculations;
pub use calculations::{CalculationDetail, Calculations};

mod settings;
pub use settings::Settings;
