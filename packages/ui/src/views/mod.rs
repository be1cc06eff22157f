mod calculations;
pub use calculations::CalculationsView;

mod calculation_detail;
pub use calculation_detail::CalculationDetailView;

mod settings;
pub use settings::SettingsView;
