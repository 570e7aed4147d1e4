use serde::{Deserialize, Serialize};

// 课程工作流状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CourseWorkflowState {
    Created,   // 已创建
    Claimed,   // 已认领
    Available, // 进行中
    Completed, // 已结课
    Deleted,   // 已删除
}

impl CourseWorkflowState {
    pub const CREATED: &'static str = "created";
    pub const CLAIMED: &'static str = "claimed";
    pub const AVAILABLE: &'static str = "available";
    pub const COMPLETED: &'static str = "completed";
    pub const DELETED: &'static str = "deleted";

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseWorkflowState::Created => Self::CREATED,
            CourseWorkflowState::Claimed => Self::CLAIMED,
            CourseWorkflowState::Available => Self::AVAILABLE,
            CourseWorkflowState::Completed => Self::COMPLETED,
            CourseWorkflowState::Deleted => Self::DELETED,
        }
    }
}

impl<'de> Deserialize<'de> for CourseWorkflowState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for CourseWorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CourseWorkflowState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::CREATED => Ok(CourseWorkflowState::Created),
            Self::CLAIMED => Ok(CourseWorkflowState::Claimed),
            Self::AVAILABLE => Ok(CourseWorkflowState::Available),
            Self::COMPLETED => Ok(CourseWorkflowState::Completed),
            Self::DELETED => Ok(CourseWorkflowState::Deleted),
            _ => Err(format!(
                "Invalid course workflow state: '{s}'. Supported: created, claimed, available, completed, deleted"
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub workflow_state: CourseWorkflowState,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Course {
    /// 已结课
    pub fn is_concluded(&self) -> bool {
        self.workflow_state == CourseWorkflowState::Completed
    }

    /// 课程是否对 LTI 工具可见（已结课或已删除的课程不可见）
    pub fn is_visible_to_tools(&self) -> bool {
        !self.is_concluded() && self.workflow_state != CourseWorkflowState::Deleted
    }
}
