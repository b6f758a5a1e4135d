//! Built-in default vocabulary.
//!
//! Used whenever no tabular terminology source is configured or none of the
//! candidate encodings yields a parseable file. The entries cover the common
//! ground of service codebases: identity, authentication, data flow, state,
//! time, and quantities, each with the abbreviations and localized forms
//! most often seen in the wild.

use crate::dictionary::entry::{TermEntry, TermSource};

macro_rules! entry {
    ($term:expr, $standard:expr, $description:expr, [$($alias:expr),* $(,)?]) => {
        TermEntry::new(
            $term,
            $standard,
            $description,
            vec![$($alias.to_string()),*],
            TermSource::Builtin,
        )
    };
}

/// The fixed default vocabulary.
pub fn builtin_entries() -> Vec<TermEntry> {
    vec![
        // Identity
        entry!("user", "user", "System user or account holder", ["usr", "usuario", "사용자", "customer", "client"]),
        entry!("user_id", "user_id", "Unique identifier for a user", ["uid", "userid", "user_identifier", "usr_id"]),
        entry!("username", "username", "User's login name", ["user_name", "uname", "login_name", "user_nm"]),
        entry!("name", "name", "Display or entity name", ["nm", "nombre", "이름"]),
        // Authentication
        entry!("password", "password", "User authentication credential", ["pwd", "pass", "비밀번호", "passwd", "pw"]),
        entry!("token", "token", "Authentication or session token", ["tkn", "auth_token", "session_token"]),
        // Data flow
        entry!("data", "data", "Information or dataset", ["datos", "info", "데이터", "information"]),
        entry!("result", "result", "Output or return value", ["res", "resultado", "결과", "output", "ret"]),
        entry!("error", "error", "Error condition or exception", ["err", "erro", "오류", "exception", "exc"]),
        entry!("message", "message", "Communication or notification", ["msg", "mensaje", "메시지", "mensagem", "notification"]),
        // State
        entry!("status", "status", "Current state or condition", ["stat", "estado", "상태", "state", "sts"]),
        entry!("active", "is_active", "Active state indicator", ["activo", "enabled", "act"]),
        entry!("deleted", "is_deleted", "Deletion state indicator", ["del", "removed", "eliminado"]),
        // Time
        entry!("created_at", "created_at", "Creation timestamp", ["created", "creation_date", "create_time", "created_dt"]),
        entry!("updated_at", "updated_at", "Last update timestamp", ["updated", "modified", "update_time", "updated_dt"]),
        // Quantities
        entry!("count", "count", "Number or quantity", ["cnt", "cantidad", "개수"]),
        entry!("number", "number", "Numeric value or ordinal", ["num", "numero", "번호"]),
        entry!("total", "total", "Sum or aggregate amount", ["tot", "sum", "합계", "total_amount"]),
        entry!("amount", "amount", "Quantity or monetary value", ["amt", "monto", "value"]),
        // Entities
        entry!("object", "object", "Data object or entity", ["obj", "objeto", "entity"]),
        entry!("item", "item", "Individual element or entry", ["itm", "elemento", "element"]),
        entry!("list", "list", "Collection of items", ["lst", "lista", "목록", "array", "collection"]),
        // Request/response
        entry!("request", "request", "API or service request", ["req", "solicitud", "요청", "petition"]),
        entry!("response", "response", "API or service response", ["resp", "respuesta", "응답", "reply"]),
        // Configuration
        entry!("configuration", "config", "System configuration", ["cfg", "conf", "설정", "settings"]),
        entry!("parameter", "parameter", "Function or method parameter", ["param", "prm", "arg", "argument"]),
    ]
}
