use actix_web::HttpResponse;
use agenda_api_structs::get_event_admin_schema::APIResponse;

pub async fn get_event_admin_schema_controller() -> HttpResponse {
    HttpResponse::Ok().json(APIResponse::new())
}
