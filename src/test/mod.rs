mod report;
mod support;
