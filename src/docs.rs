use crate::api::atenciones::{AtencionCreatedResponse, AtencionListResponse, CreatedId};
use crate::model::{Atencion, NuevaAtencion};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registro de Atenciones API",
        version = "1.0.0",
        description = r#"
## Registro de Atenciones

Records timed service interactions (*atenciones*) with citizens and lists them back.

### Endpoints
- `GET /records` lists every record in insertion order
- `POST /records` stores a new record and returns its id

### Response Format
- Success: `{"message": "success", "data": ...}`
- Failure: `{"error": "..."}`, plus `fields` when the payload fails validation

Records are immutable: there is no update or delete.
"#,
    ),
    paths(
        crate::api::atenciones::list_atenciones,
        crate::api::atenciones::create_atencion,
    ),
    components(
        schemas(
            Atencion,
            NuevaAtencion,
            AtencionListResponse,
            AtencionCreatedResponse,
            CreatedId
        )
    ),
    tags(
        (name = "Atenciones", description = "Attendance record APIs"),
    )
)]
pub struct ApiDoc;
