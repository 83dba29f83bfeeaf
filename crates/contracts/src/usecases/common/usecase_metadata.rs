/// UseCase identification, used for logging and error codes
pub trait UseCaseMetadata {
    /// UseCase index (for example "u501")
    fn usecase_index() -> &'static str;

    /// Technical name (for example "stock_levels")
    fn usecase_name() -> &'static str;

    /// Human-readable name
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Full name such as "u501_stock_levels"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
