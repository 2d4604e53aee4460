//! 学生回条表单模型
//!
//! 表单由声明式字段描述驱动：默认表单加按活动覆写，同意书活动另挂
//! 固定的同意段（同意与否、搭车选项、家长备注与签名）。
//! 提交前在本地完成必填校验与大小限制，不送无效请求。

mod definition;
mod model;
mod signature;

pub use definition::{FieldDef, FieldKind, FormDefinition, FormRegistry};
pub use model::{AnswerDraft, FormLimits, FormModel};
pub use signature::{SignatureEncoder, SignatureField, SignatureState};
