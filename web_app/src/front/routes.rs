//! Frontend route configuration module.
//!
//! Routes are grouped by resource into scopes. Every route except the
//! authentication ones requires a logged tutor.

use super::{auth, event, goal, pet, server, shop, shopping};
use ntex::web;

/// Configures pet routes and the per pet child resources.
///
/// # Routes
/// - `GET /pets/` - List tutor's pets
/// - `GET,POST /pets/new` - Create pet
/// - `GET,POST /pets/{pet_id}/edit` - Update pet
/// - `GET,POST /pets/{pet_id}/delete` - Confirm and delete pet
/// - `GET /pets/{pet_id}/overview` - Pet statistics
/// - `GET,POST /pets/{pet_id}/events` - List and add events
/// - `GET,POST /pets/{pet_id}/goals` - List and add goals
/// - `GET,POST /pets/{pet_id}/shopping` - List and add shopping items
pub fn pets(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pets")
            .service((
                pet::user_pets_list,
                pet::get_new_pet_form,
                pet::create_pet,
                pet::get_edit_pet_form,
                pet::edit_pet,
                pet::get_delete_pet_view,
                pet::delete_pet,
                pet::get_pet_overview,
            ))
            .service((
                event::get_pet_events,
                event::add_event,
                goal::get_pet_goals,
                goal::add_goal,
                shopping::get_pet_shopping_list,
                shopping::add_shopping_item,
            )),
    );
}

/// Configures event routes.
///
/// # Routes
/// - `GET,POST /events/{event_id}/edit` - Update event
/// - `GET,POST /events/{event_id}/delete` - Confirm and delete event
/// - `GET /events/{event_id}/complete` - Mark event as completed
/// - `GET,POST /events/select-pet` - Pick the pet to log events for
pub fn events(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/events").service((
        event::get_select_pet_view,
        event::select_pet,
        event::get_edit_event_form,
        event::edit_event,
        event::get_delete_event_view,
        event::delete_event,
        event::complete_event,
    )));
}

/// Configures goal routes.
///
/// # Routes
/// - `POST /goals/{goal_id}/progress` - Update goal progress
/// - `GET /goals/{goal_id}/complete` - Take goal progress to 100
/// - `GET,POST /goals/{goal_id}/delete` - Confirm and delete goal
pub fn goals(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/goals").service((
        goal::update_goal_progress,
        goal::complete_goal,
        goal::get_delete_goal_view,
        goal::delete_goal,
    )));
}

/// Configures shopping list routes.
///
/// # Routes
/// - `GET /shopping/{item_id}/toggle` - Flip purchased state
/// - `GET,POST /shopping/{item_id}/delete` - Confirm and remove item
pub fn shopping(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/shopping").service((
        shopping::toggle_shopping_item,
        shopping::get_delete_shopping_item_view,
        shopping::delete_shopping_item,
    )));
}

/// Configures the product shop, only mounted when the shop is enabled.
///
/// # Routes
/// - `GET /shop` - Product catalog
/// - `GET /cart` - Cart with totals
/// - `POST /cart/add/{product_id}` - Add product to cart
/// - `POST /cart/remove/{product_id}` - Remove product from cart
/// - `POST /checkout` - Buy the cart
/// - `GET /purchase-success` - Purchase confirmation
pub fn shop(cfg: &mut web::ServiceConfig) {
    cfg.service((
        shop::get_shop_view,
        shop::get_cart_view,
        shop::add_to_cart,
        shop::remove_from_cart,
        shop::checkout,
        shop::get_purchase_success_view,
    ));
}

/// Configures the index and authentication routes.
///
/// # Routes
/// - `GET /` - Redirect to the pets list
/// - `GET,POST /login`, `GET,POST /register`, `GET,POST /logout`
pub fn auth(cfg: &mut web::ServiceConfig) {
    cfg.service((
        server::index,
        auth::get_login_view,
        auth::login,
        auth::get_register_view,
        auth::register,
        auth::get_logout_view,
        auth::logout,
    ));
}
