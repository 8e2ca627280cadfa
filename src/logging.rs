//! relgrab logging
//!
//! Timestamped console logging mirrored to a per-run file under
//! ~/.relgrab/logs/. Errors go to stderr, everything else to stdout.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

static LOGGER: OnceLock<Arc<Mutex<GrabLogger>>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Download,
    Warning,
    Error,
}

impl LogLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => "[INFO]",
            LogLevel::Download => "[DOWNLOAD]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Error => "[ERROR]",
        }
    }
}

pub struct GrabLogger {
    log_file: Option<File>,
}

impl GrabLogger {
    pub fn new() -> Self {
        let home = std::env::var("HOME").unwrap_or_default();
        let log_dir = PathBuf::from(format!("{}/.relgrab/logs", home));
        let _ = fs::create_dir_all(&log_dir);

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("relgrab_{}.log", timestamp));

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .ok();

        let mut logger = Self { log_file };

        let header = format!(
            "relgrab v{} - {}",
            env!("CARGO_PKG_VERSION"),
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        logger.write_file(&header);

        logger
    }

    fn write_file(&mut self, msg: &str) {
        if let Some(ref mut file) = self.log_file {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }
    }

    pub fn log(&mut self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        let formatted = format!("[{}] {} {}", timestamp, level.prefix(), message);
        self.write_file(&formatted);

        if level == LogLevel::Error {
            eprintln!("{}", formatted);
        } else {
            println!("{}", formatted);
        }
    }
}

impl Default for GrabLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the global logger (call once at startup)
pub fn init_logger() {
    LOGGER.get_or_init(|| Arc::new(Mutex::new(GrabLogger::new())));
}

fn logger() -> Arc<Mutex<GrabLogger>> {
    LOGGER
        .get_or_init(|| Arc::new(Mutex::new(GrabLogger::new())))
        .clone()
}

pub fn log_info(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Info, message);
    }
}

pub fn log_download(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Download, message);
    }
}

pub fn log_warning(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Warning, message);
    }
}

pub fn log_error(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Error, message);
    }
}
