mod formatter;

pub use formatter::FlowFormatter;
