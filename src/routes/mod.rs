use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::events::{create_event, delete_event, get_event, list_events, update_event};
use crate::handlers::health_check;
use crate::handlers::organizers::{
    create_organizer, delete_organizer, get_organizer, list_organizers, update_organizer,
};
use crate::handlers::reports::{events_by_category, tickets_joined};
use crate::handlers::tickets::{
    create_ticket, delete_ticket, get_ticket, list_tickets, update_ticket,
};
use crate::state::AppState;

pub fn create_routes(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/organizers", post(create_organizer).get(list_organizers))
        .route(
            "/organizers/:id",
            get(get_organizer)
                .put(update_organizer)
                .delete(delete_organizer),
        )
        .route("/events", post(create_event).get(list_events))
        .route("/events/filter", get(list_events))
        .route(
            "/events/:id",
            get(get_event)
                .put(update_event)
                .patch(update_event)
                .delete(delete_event),
        )
        .route("/tickets", post(create_ticket).get(list_tickets))
        .route(
            "/tickets/:id",
            get(get_ticket).put(update_ticket).delete(delete_ticket),
        )
        .route("/reports/tickets-joined", get(tickets_joined))
        .route("/reports/events-by-category", get(events_by_category))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
