//! 成绩项字段校验

// 文本字段最大长度（与数据库 string 列一致）
pub const MAX_TEXT_LENGTH: usize = 255;

/// 成绩项字段校验结果
#[derive(Debug, Clone)]
pub struct LineItemValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl LineItemValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 待校验的成绩项字段，None 表示请求中未提供
#[derive(Debug, Clone, Copy, Default)]
pub struct LineItemFields<'a> {
    pub score_maximum: Option<f64>,
    pub label: Option<&'a str>,
    pub resource_id: Option<&'a str>,
    pub tag: Option<&'a str>,
}

pub fn validate_score_maximum(score_maximum: f64) -> Result<(), &'static str> {
    if !score_maximum.is_finite() {
        return Err("scoreMaximum must be a finite number");
    }
    if score_maximum < 0.0 {
        return Err("scoreMaximum must be greater than or equal to 0");
    }
    Ok(())
}

pub fn validate_label(label: &str) -> Result<(), &'static str> {
    if label.trim().is_empty() {
        return Err("label must not be blank");
    }
    if label.chars().count() > MAX_TEXT_LENGTH {
        return Err("label must be at most 255 characters");
    }
    Ok(())
}

/// 校验成绩项字段
///
/// 规则：
/// - scoreMaximum：有限且非负
/// - label：非空白，最多 255 字符
/// - resourceId / tag：最多 255 字符
pub fn validate_line_item_fields(fields: LineItemFields<'_>) -> LineItemValidationResult {
    let mut errors = Vec::new();

    if let Some(score_maximum) = fields.score_maximum
        && let Err(e) = validate_score_maximum(score_maximum)
    {
        errors.push(e);
    }

    if let Some(label) = fields.label
        && let Err(e) = validate_label(label)
    {
        errors.push(e);
    }

    if fields
        .resource_id
        .is_some_and(|v| v.chars().count() > MAX_TEXT_LENGTH)
    {
        errors.push("resourceId must be at most 255 characters");
    }

    if fields
        .tag
        .is_some_and(|v| v.chars().count() > MAX_TEXT_LENGTH)
    {
        errors.push("tag must be at most 255 characters");
    }

    LineItemValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}
