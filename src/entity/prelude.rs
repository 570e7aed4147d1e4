//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::line_items::{
    ActiveModel as LineItemActiveModel, Entity as LineItems, Model as LineItemModel,
};
pub use super::resource_links::{
    ActiveModel as ResourceLinkActiveModel, Entity as ResourceLinks, Model as ResourceLinkModel,
};
