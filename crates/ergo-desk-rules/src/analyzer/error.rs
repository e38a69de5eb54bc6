use ergo_desk_core::BoxError;

/// Errors returned by the ergonomics analyzer.
///
/// Missing inputs for an individual rule are not errors; the rule is just
/// skipped. Only a misconfigured analyzer or unusable box data fails.
#[derive(thiserror::Error, Debug)]
pub enum AnalyzeError {
    #[error("main screen is not set; call set_main_screen() first")]
    MainScreenNotSet,
    #[error("screen `{id}` has an invalid box")]
    InvalidBox {
        id: String,
        #[source]
        source: BoxError,
    },
}
