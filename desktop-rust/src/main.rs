mod app;
mod io;
mod model;

use std::io::Write;

use app::StudioApp;

/// ログ出力用のファイル名（パスの末尾のみ）
fn source_file_name(file: Option<&str>) -> &str {
    file.and_then(|f| f.rsplit(['/', '\\']).next()).unwrap_or("None")
}

/// `[HH:MM:SS LEVEL file line] message` 形式。CLIと同じ
fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                source_file_name(record.file()),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
}

fn main() -> eframe::Result<()> {
    init_logger();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };
    eframe::run_native(
        "Photo Studio",
        options,
        Box::new(|_cc| Box::new(StudioApp::new())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_name_keeps_basename() {
        assert_eq!(source_file_name(Some("desktop-rust/src/app.rs")), "app.rs");
        assert_eq!(source_file_name(Some("src\\io.rs")), "io.rs");
        assert_eq!(source_file_name(Some("main.rs")), "main.rs");
        assert_eq!(source_file_name(None), "None");
    }
}
