use serde::Serialize;
use ts_rs::TS;

use super::entities::Routine;
use crate::models::classes::responses::ClassOption;

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/routine.ts")]
pub struct RoutineCreatedResponse {
    pub routine: Routine,
    pub class_info: ClassOption,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "PascalCase")]
#[ts(export, export_to = "../frontend/src/types/generated/routine.ts")]
pub struct DeletedRoutine {
    #[serde(rename = "RoutineID")]
    pub routine_id: i64,
    pub routine_title: String,
    pub class_section_name: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/routine.ts")]
pub struct RoutineDeletedResponse {
    pub deleted_routine: DeletedRoutine,
}

// 筛选下拉选项
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/routine.ts")]
pub struct RoutineFilterOptions {
    pub class_names: Vec<String>,
    pub sections: Vec<String>,
}
