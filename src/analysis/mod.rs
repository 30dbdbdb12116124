pub mod analyzer;
pub mod observer;
pub mod rate;

pub use analyzer::{LumaAnalyzer, LumaFrame};
pub use observer::{result_sink, AnalysisResult, LumaObserver, ResultSink};
pub use rate::RateWindow;
