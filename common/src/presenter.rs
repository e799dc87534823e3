//! 表示層の境界
//!
//! コントローラは `Presenter` 経由でのみ画面に触れる。`ResultView` は
//! 結果セクションに表示する文字列を整形済みで保持する。

use crate::api::ApiConfig;
use crate::error::{ErrorKind, Result};
use crate::types::{AnalysisResult, ImageArtifact, ReportFile};

pub trait Presenter {
    fn show_loading(&self, message: &str);
    fn hide_loading(&self);
    fn show_preview(&self, image: &ImageArtifact);
    fn render_result(&self, view: &ResultView);
    fn render_error(&self, kind: ErrorKind, message: &str);
    fn show_success(&self, message: &str);
    fn save_report(&self, report: &ReportFile) -> Result<()>;
    /// 結果を隠し、プレビューをプレースホルダーに戻す
    fn reset_view(&self);
}

/// 小数点以下1桁（グレードバー横の表示）
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub analysis_id: String,
    pub good_text: String,
    pub defect_text: String,
    /// 積み上げバー各セグメントのCSS高さ
    pub good_bar_height: String,
    pub defect_bar_height: String,
    pub good_title: String,
    pub defect_title: String,
    pub total_beans: u32,
    pub good_beans: u32,
    pub defect_beans: u32,
    pub grade: Option<String>,
    pub annotated_image_url: Option<String>,
}

impl ResultView {
    pub fn new(result: &AnalysisResult, config: &ApiConfig) -> Self {
        let analysis = &result.analysis;
        let good_text = format_percentage(analysis.good_percentage);
        let defect_text = format_percentage(analysis.defect_percentage);

        let grade = analysis.grade.as_ref().map(|grade| match &analysis.grade_description {
            Some(description) if !description.is_empty() => format!("{} - {}", grade, description),
            _ => grade.clone(),
        });

        Self {
            analysis_id: result.analysis_id.clone(),
            good_bar_height: format!("{}%", analysis.good_percentage),
            defect_bar_height: format!("{}%", analysis.defect_percentage),
            good_title: format!("Good: {}", good_text),
            defect_title: format!("Defect: {}", defect_text),
            good_text,
            defect_text,
            total_beans: analysis.total_beans,
            good_beans: analysis.good_beans,
            defect_beans: analysis.defect_beans,
            grade,
            annotated_image_url: result
                .annotated_filename
                .as_deref()
                .map(|f| config.annotated_image_url(f)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BeanAnalysis;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            analysis_id: "abc123".into(),
            analysis: BeanAnalysis {
                total_beans: 50,
                good_beans: 40,
                defect_beans: 10,
                good_percentage: 80.0,
                defect_percentage: 20.0,
                ..Default::default()
            },
            annotated_filename: None,
            original_filename: None,
            detections_count: None,
        }
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(80.0), "80.0%");
        assert_eq!(format_percentage(33.333), "33.3%");
        assert_eq!(format_percentage(0.0), "0.0%");
    }

    #[test]
    fn test_result_view_scenario() {
        let view = ResultView::new(&sample(), &ApiConfig::default());
        assert_eq!(view.good_text, "80.0%");
        assert_eq!(view.defect_text, "20.0%");
        assert_eq!(view.good_bar_height, "80%");
        assert_eq!(view.defect_bar_height, "20%");
        assert_eq!(view.good_title, "Good: 80.0%");
        assert_eq!(view.defect_title, "Defect: 20.0%");
        assert_eq!((view.total_beans, view.good_beans, view.defect_beans), (50, 40, 10));
        assert!(view.grade.is_none());
        assert!(view.annotated_image_url.is_none());
    }

    #[test]
    fn test_result_view_grade_and_image() {
        let mut result = sample();
        result.analysis.grade = Some("Grade 1".into());
        result.analysis.grade_description = Some("Specialty".into());
        result.annotated_filename = Some("annotated_abc123.jpg".into());

        let view = ResultView::new(&result, &ApiConfig::new("http://localhost:5000/api"));
        assert_eq!(view.grade.as_deref(), Some("Grade 1 - Specialty"));
        assert_eq!(
            view.annotated_image_url.as_deref(),
            Some("http://localhost:5000/uploads/annotated_abc123.jpg")
        );
    }
}
