use clap::Parser;
use photo_studio::{cli, config, editing, error, logger};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use photo_studio_common::catalog::FILTER_CATALOG;
use photo_studio_common::{DisabledBackend, PhotoEditor, TransformBackend, TransformOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Apply { image, filter, output } => {
            println!("🎨 photo-studio - フィルタ適用\n");

            let filter = filter.unwrap_or(config.default_filter);
            let output_dir = output.unwrap_or_else(|| config.output_dir());

            println!("[1/2] 画像を読み込み中...");
            println!("[2/2] {} を適用中...", filter);
            let path = editing::run_apply(&image, filter, &output_dir).await?;
            println!("✔ 保存: {}", path.display());

            println!("\n✅ 完了");
        }

        Commands::Edit { image, steps, output, dump_session } => {
            println!("🎨 photo-studio - 編集\n");

            let output_dir = output.unwrap_or_else(|| config.output_dir());
            let report = editing::run_edit(&image, &steps, &output_dir).await?;

            println!(
                "\n状態: {:?} / フィルタ: {}",
                report.session.phase(),
                report.session.active_filter
            );

            if let Some(path) = dump_session {
                let json = serde_json::to_string_pretty(&report.session)?;
                std::fs::write(&path, json)?;
                println!("✔ セッションを保存: {}", path.display());
            }

            println!("\n✅ {}件保存", report.downloads.len());
        }

        Commands::Batch { folder, filter, output } => {
            println!("🚀 photo-studio - 一括処理\n");

            let output_dir = output.unwrap_or_else(|| folder.join("edited"));
            let results = editing::batch::run_batch(&folder, filter, &output_dir)?;

            let failed: Vec<_> = results.iter().filter(|r| r.output.is_err()).collect();
            for item in &failed {
                if let Err(e) = &item.output {
                    println!("  ✗ {}: {}", item.source.display(), e);
                }
            }
            println!(
                "✔ {}/{}枚を保存: {}",
                results.len() - failed.len(),
                results.len(),
                output_dir.display()
            );

            println!("\n✅ 完了");
        }

        Commands::Filters => {
            for entry in FILTER_CATALOG.iter() {
                println!(
                    "{} {:<14} {:<10} {}",
                    entry.icon,
                    entry.filter.id(),
                    entry.name,
                    entry.filter.style()
                );
            }
        }

        Commands::Prompt { text } => {
            let mut editor = PhotoEditor::with_backend(DisabledBackend);
            editor.prompt_mut().set_text(text);

            match editor.prompt().submit(false) {
                Some(prompt) => match editor.submit_prompt(&prompt)? {
                    TransformOutcome::Unavailable => {
                        println!("AI変換は現在利用できません（バックエンド: {}）", editor.backend().name())
                    }
                    TransformOutcome::Pending => println!("受け付けました"),
                    TransformOutcome::Completed(_) => println!("変換完了"),
                },
                None => println!(
                    "AI変換は現在利用できません（バックエンド: {}）",
                    editor.backend().name()
                ),
            }
        }

        Commands::Config { set_output_dir, set_default_filter, show } => {
            let mut config = config;

            if let Some(dir) = set_output_dir {
                config.set_output_dir(dir)?;
                println!("✔ 出力先を設定しました");
            }

            if let Some(filter) = set_default_filter {
                config.default_filter = filter;
                config.save()?;
                println!("✔ 既定フィルタを設定しました");
            }

            if show {
                println!("設定:");
                println!("  出力先: {}", config.output_dir().display());
                println!("  既定フィルタ: {}", config.default_filter);
                println!("  AI変換: {}", if config.prompt_enabled { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}
