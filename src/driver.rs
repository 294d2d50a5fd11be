//! ソースファイルの管理と複数ファイルの解析
//!
//! 各ファイルの解析は独立しているので、ファイル単位でスレッドに分けて並列に解析する。
//! 診断はcodespan-reportingで表示する。

use std::fs;
use std::path::Path;
use std::thread;

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream, WriteColor};
use log::{debug, info};

use crate::dialect::ParserConfig;
use crate::error::{BarqError, BarqResult, DiagnosticError, ErrorCollector};
use crate::parser::{parse_module_here, parse_module_with, ParseOutput, PARSER_STACK_SIZE};

/// 名前付きのソーステキスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// ファイルから読み込む
    pub fn read<P: AsRef<Path>>(path: P) -> BarqResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            BarqError::Io(format!("failed to read {}: {}", path.display(), e))
        })?;
        Ok(Self::new(path.display().to_string(), text))
    }
}

/// 複数のファイルを並列に解析する
///
/// 結果は入力と同じ順に並ぶ。
pub fn parse_files(files: &[SourceFile], config: &ParserConfig) -> Vec<ParseOutput> {
    if files.len() <= 1 {
        return files
            .iter()
            .map(|file| parse_file(file, config))
            .collect();
    }

    thread::scope(|scope| {
        let handles: Vec<_> = files
            .iter()
            .map(|file| {
                thread::Builder::new()
                    .name(format!("parse {}", file.name))
                    .stack_size(PARSER_STACK_SIZE)
                    .spawn_scoped(scope, move || {
                        debug!("parsing {}", file.name);
                        parse_module_here(&file.text, config)
                    })
                    .map_err(|e| (file, e))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle {
                Ok(handle) => match handle.join() {
                    Ok(output) => output,
                    Err(panic) => std::panic::resume_unwind(panic),
                },
                Err((file, e)) => {
                    // スレッドを作れなければこのスレッドで解析する
                    debug!("could not spawn parser thread for {}: {}", file.name, e);
                    parse_file(file, config)
                }
            })
            .collect()
    })
}

fn parse_file(file: &SourceFile, config: &ParserConfig) -> ParseOutput {
    debug!("parsing {}", file.name);
    parse_module_with(&file.text, config)
}

/// 解析セッション
///
/// ファイルと診断を保持し、まとめて報告する。
pub struct Session {
    config: ParserConfig,
    files: SimpleFiles<String, String>,
    sources: Vec<(usize, SourceFile)>,
    error_collector: ErrorCollector,
}

impl Session {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            files: SimpleFiles::new(),
            sources: Vec::new(),
            error_collector: ErrorCollector::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// ファイルを追加し、そのIDを返す
    pub fn add_file(&mut self, file: SourceFile) -> usize {
        let file_id = self.files.add(file.name.clone(), file.text.clone());
        self.sources.push((file_id, file));
        file_id
    }

    /// パスからファイルを読み込んで追加
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> BarqResult<usize> {
        let file = SourceFile::read(path)?;
        Ok(self.add_file(file))
    }

    /// 追加済みのファイルをすべて解析し、診断を記録する
    pub fn parse_all(&mut self) -> Vec<(usize, ParseOutput)> {
        let files: Vec<SourceFile> = self.sources.iter().map(|(_, f)| f.clone()).collect();
        let outputs = parse_files(&files, &self.config);

        let results: Vec<_> = self
            .sources
            .iter()
            .map(|(file_id, _)| *file_id)
            .zip(outputs)
            .collect();

        for (file_id, output) in &results {
            for diagnostic in &output.diagnostics {
                self.error_collector
                    .add_error(diagnostic.clone().into(), *file_id);
            }
        }
        info!(
            "parsed {} files with {} errors",
            results.len(),
            self.error_collector.error_count()
        );
        results
    }

    /// ファイルIDから名前を取得
    pub fn file_name(&self, file_id: usize) -> Option<&str> {
        self.sources
            .iter()
            .find(|(id, _)| *id == file_id)
            .map(|(_, file)| file.name.as_str())
    }

    /// エラーを追加
    pub fn add_error(&mut self, error: BarqError, file_id: usize) {
        self.error_collector.add_error(error, file_id);
    }

    pub fn errors(&self) -> &[DiagnosticError] {
        self.error_collector.errors()
    }

    /// エラーがあるかチェック
    pub fn has_errors(&self) -> bool {
        self.error_collector.has_errors()
    }

    /// エラー数を取得
    pub fn error_count(&self) -> usize {
        self.error_collector.error_count()
    }

    /// 診断情報を標準エラーに報告
    pub fn report_diagnostics(&self) -> BarqResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let mut lock = writer.lock();
        self.emit_diagnostics(&mut lock)
    }

    /// 診断情報を任意の出力先に書き出す
    pub fn emit_diagnostics(&self, writer: &mut dyn WriteColor) -> BarqResult<()> {
        let config = codespan_reporting::term::Config::default();
        for error in self.error_collector.errors() {
            let diagnostic = error.to_diagnostic();
            codespan_reporting::term::emit(writer, &config, &self.files, &diagnostic)
                .map_err(|e| BarqError::Io(format!("failed to emit diagnostic: {}", e)))?;
        }
        Ok(())
    }
}
