pub mod entities;
pub mod requests;
pub mod responses;

/// 单个成绩项的媒体类型
pub const LINE_ITEM_MIME_TYPE: &str = "application/vnd.ims.lis.v2.lineitem+json";
/// 成绩项列表的媒体类型
pub const LINE_ITEM_CONTAINER_MIME_TYPE: &str =
    "application/vnd.ims.lis.v2.lineitemcontainer+json";
