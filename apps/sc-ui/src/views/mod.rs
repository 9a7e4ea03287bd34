pub mod chart_view;
pub mod inputs_view;
pub mod table_view;

pub use chart_view::ChartView;
pub use inputs_view::InputsView;
pub use table_view::TableView;
