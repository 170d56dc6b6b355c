//! Tesseract reader backend via `kreuzberg-tesseract`.

use std::path::Path;
use std::sync::Arc;

use image::RgbImage;
use kreuzberg_tesseract::TesseractAPI;

use crate::error::{PankowError, Result};
use crate::types::{Detection, corners};

use super::reader::{Reader, ReaderFactory, ReaderKey};

/// Default factory: builds [`TesseractReader`]s.
#[derive(Debug, Default)]
pub struct TesseractReaderFactory;

impl TesseractReaderFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ReaderFactory for TesseractReaderFactory {
    fn create(&self, key: &ReaderKey) -> Result<Arc<dyn Reader>> {
        Ok(Arc::new(TesseractReader::new(key)?))
    }
}

/// One validated Tesseract configuration: resolved tessdata directory and a
/// `+`-joined language string.
///
/// Construction resolves and validates everything that can fail up front
/// (missing tessdata, unknown languages) and runs a probe init, so cache
/// misses pay the model-loading cost once and recognition calls start from
/// a known-good state. Each `read_text` call drives a fresh `TesseractAPI`,
/// which keeps the reader `Send + Sync` without sharing engine internals
/// across threads.
pub struct TesseractReader {
    datapath: String,
    language: String,
}

impl TesseractReader {
    pub fn new(key: &ReaderKey) -> Result<Self> {
        if key.languages.is_empty() {
            return Err(PankowError::reader_init("no languages specified"));
        }
        if key.accelerate {
            tracing::debug!("accelerator requested; the Tesseract backend runs on CPU");
        }

        let language = key
            .languages
            .iter()
            .map(|code| normalize_language(code))
            .collect::<Vec<_>>()
            .join("+");

        let datapath = resolve_tessdata_dir();

        // Tesseract can segfault on a missing language file instead of
        // returning an error, so check traineddata before init.
        if !datapath.is_empty() {
            for lang in language.split('+') {
                let traineddata = Path::new(&datapath).join(format!("{}.traineddata", lang));
                if !traineddata.exists() {
                    return Err(PankowError::reader_init(format!(
                        "language '{}' not found: {} does not exist",
                        lang,
                        traineddata.display()
                    )));
                }
            }
        }

        let api = TesseractAPI::new();
        api.init(&datapath, &language).map_err(|e| {
            PankowError::reader_init(format!("failed to initialize language '{}': {}", language, e))
        })?;

        tracing::info!(language, datapath, "Tesseract reader ready");
        Ok(Self { datapath, language })
    }
}

impl Reader for TesseractReader {
    fn read_text(&self, image: &RgbImage) -> Result<Vec<Detection>> {
        let (width, height) = image.dimensions();
        let bytes_per_pixel = 3i32;
        let bytes_per_line = width as i32 * bytes_per_pixel;

        let api = TesseractAPI::new();
        api.init(&self.datapath, &self.language)
            .map_err(|e| PankowError::recognition(format!("failed to initialize engine: {}", e)))?;

        api.set_image(image.as_raw(), width as i32, height as i32, bytes_per_pixel, bytes_per_line)
            .map_err(|e| PankowError::recognition(format!("failed to set image: {}", e)))?;

        api.recognize()
            .map_err(|e| PankowError::recognition(format!("failed to recognize text: {}", e)))?;

        let tsv = api
            .get_tsv_text(0)
            .map_err(|e| PankowError::recognition(format!("failed to extract results: {}", e)))?;

        Ok(detections_from_tsv(&tsv))
    }
}

/// Resolve the tessdata directory: `TESSDATA_PREFIX` first, then the
/// conventional install locations.
fn resolve_tessdata_dir() -> String {
    const FALLBACK_PATHS: &[&str] = &[
        "/opt/homebrew/share/tessdata",
        "/opt/homebrew/opt/tesseract/share/tessdata",
        "/usr/local/opt/tesseract/share/tessdata",
        "/usr/share/tesseract-ocr/5/tessdata",
        "/usr/share/tesseract-ocr/4/tessdata",
        "/usr/share/tessdata",
        "/usr/local/share/tessdata",
        r#"C:\Program Files\Tesseract-OCR\tessdata"#,
        r#"C:\ProgramData\Tesseract-OCR\tessdata"#,
    ];

    std::env::var("TESSDATA_PREFIX")
        .ok()
        .or_else(|| {
            FALLBACK_PATHS
                .iter()
                .find(|p| Path::new(p).exists())
                .map(|p| (*p).to_string())
        })
        .unwrap_or_default()
}

/// Map common two-letter language codes to Tesseract's three-letter codes.
/// Unknown codes pass through for the engine to accept or reject.
fn normalize_language(code: &str) -> String {
    match code {
        "en" => "eng",
        "es" => "spa",
        "de" => "deu",
        "fr" => "fra",
        "it" => "ita",
        "pt" => "por",
        "nl" => "nld",
        "pl" => "pol",
        "ru" => "rus",
        "tr" => "tur",
        "ja" => "jpn",
        "ko" => "kor",
        "zh" => "chi_sim",
        "ar" => "ara",
        "hi" => "hin",
        other => other,
    }
    .to_string()
}

/// Parse Tesseract TSV output into line-level detections.
///
/// Word rows (level 5) are grouped by (block, paragraph, line); each group
/// becomes one detection whose box is the union of the word boxes, whose
/// text is the words joined by spaces, and whose confidence is the mean
/// word confidence scaled from percent into [0, 1]. Row order is preserved,
/// so detections come out in the engine's reading order.
pub(crate) fn detections_from_tsv(tsv: &str) -> Vec<Detection> {
    const WORD_LEVEL: u32 = 5;
    const MIN_FIELDS: usize = 12;

    struct LineAccumulator {
        group: (u32, u32, u32),
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
        words: Vec<String>,
        conf_sum: f64,
    }

    impl LineAccumulator {
        fn finish(self) -> Detection {
            let conf = (self.conf_sum / self.words.len() as f64 / 100.0).clamp(0.0, 1.0);
            Detection {
                bbox: corners(self.left, self.top, self.right - self.left, self.bottom - self.top),
                text: self.words.join(" "),
                conf,
            }
        }
    }

    let mut detections = Vec::new();
    let mut current: Option<LineAccumulator> = None;

    for (line_num, row) in tsv.lines().enumerate() {
        if line_num == 0 {
            continue;
        }

        let fields: Vec<&str> = row.trim_end().split('\t').collect();
        if fields.len() < MIN_FIELDS {
            continue;
        }
        if fields[0].parse::<u32>().unwrap_or(0) != WORD_LEVEL {
            continue;
        }

        let conf = fields[10].parse::<f64>().unwrap_or(-1.0);
        let text = fields[11].trim();
        if conf < 0.0 || text.is_empty() {
            continue;
        }

        let group = (
            fields[2].parse().unwrap_or(0),
            fields[3].parse().unwrap_or(0),
            fields[4].parse().unwrap_or(0),
        );
        let left: i32 = fields[6].parse().unwrap_or(0);
        let top: i32 = fields[7].parse().unwrap_or(0);
        let right = left + fields[8].parse::<i32>().unwrap_or(0);
        let bottom = top + fields[9].parse::<i32>().unwrap_or(0);

        match current.as_mut() {
            Some(acc) if acc.group == group => {
                acc.left = acc.left.min(left);
                acc.top = acc.top.min(top);
                acc.right = acc.right.max(right);
                acc.bottom = acc.bottom.max(bottom);
                acc.words.push(text.to_string());
                acc.conf_sum += conf;
            }
            _ => {
                if let Some(done) = current.take() {
                    detections.push(done.finish());
                }
                current = Some(LineAccumulator {
                    group,
                    left,
                    top,
                    right,
                    bottom,
                    words: vec![text.to_string()],
                    conf_sum: conf,
                });
            }
        }
    }

    if let Some(done) = current.take() {
        detections.push(done.finish());
    }

    detections
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    fn tsv(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }

    #[test]
    fn test_words_on_one_line_merge() {
        let data = tsv(&[
            "5\t1\t1\t1\t1\t1\t100\t50\t80\t30\t95.0\tHello",
            "5\t1\t1\t1\t1\t2\t190\t52\t70\t28\t85.0\tWorld",
        ]);

        let detections = detections_from_tsv(&data);
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].text, "Hello World");
        assert_eq!(detections[0].bbox, [[100, 50], [260, 50], [260, 80], [100, 80]]);
        assert!((detections[0].conf - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_separate_lines_stay_separate() {
        let data = tsv(&[
            "5\t1\t1\t1\t1\t1\t10\t10\t50\t20\t90.0\tfirst",
            "5\t1\t1\t1\t2\t1\t10\t40\t60\t20\t80.0\tsecond",
        ]);

        let detections = detections_from_tsv(&data);
        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].text, "first");
        assert_eq!(detections[1].text, "second");
    }

    #[test]
    fn test_non_word_rows_and_negative_conf_skipped() {
        let data = tsv(&[
            "4\t1\t1\t1\t1\t0\t10\t10\t200\t20\t-1\t",
            "5\t1\t1\t1\t1\t1\t10\t10\t50\t20\t-1\tnoise",
            "5\t1\t1\t1\t1\t2\t70\t10\t50\t20\t88.0\tkept",
        ]);

        let detections = detections_from_tsv(&data);
        assert_eq!(detections.len(), 1);
        assert_eq!(detections[0].text, "kept");
    }

    #[test]
    fn test_confidence_normalized_into_unit_interval() {
        let data = tsv(&["5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t100.0\tmax"]);
        let detections = detections_from_tsv(&data);
        assert_eq!(detections[0].conf, 1.0);
    }

    #[test]
    fn test_empty_tsv_yields_no_detections() {
        assert!(detections_from_tsv(HEADER).is_empty());
        assert!(detections_from_tsv("").is_empty());
    }

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("en"), "eng");
        assert_eq!(normalize_language("es"), "spa");
        assert_eq!(normalize_language("deu"), "deu");
        assert_eq!(normalize_language("xx"), "xx");
    }
}
