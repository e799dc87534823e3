//! ランディングページのドロップゾーン
//!
//! ランディングのアップロードダイアログのインジケータ用クラスとラベルを管理する。
//! 選択されたファイル名を記録するだけで、検証は行わない。

use crate::messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropZone {
    original_label: String,
    label: String,
    drag_active: bool,
    file_selected: bool,
    slot: Option<String>,
}

impl DropZone {
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            original_label: label.clone(),
            label,
            drag_active: false,
            file_selected: false,
            slot: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn is_file_selected(&self) -> bool {
        self.file_selected
    }

    /// 入力スロットが保持しているファイル名
    pub fn selected_file(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    pub fn drag_over(&mut self) {
        self.drag_active = true;
    }

    pub fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// ドロップ時は常にドラッグ表示を解除。空のペイロードでは何も選択しない
    pub fn drop_files(&mut self, first_name: Option<&str>) {
        self.drag_active = false;
        if let Some(name) = first_name {
            self.adopt(name);
        }
    }

    /// input経由の手動選択。`drop_files` とスロットを共有
    pub fn pick(&mut self, first_name: Option<&str>) {
        if let Some(name) = first_name {
            self.adopt(name);
        }
    }

    pub fn dialog_closed(&mut self) {
        self.label = self.original_label.clone();
        self.drag_active = false;
        self.file_selected = false;
        self.slot = None;
    }

    fn adopt(&mut self, name: &str) {
        self.label = format!("{}{}", messages::FILE_SELECTED_PREFIX, name);
        self.file_selected = true;
        self.slot = Some(name.to_string());
    }
}
