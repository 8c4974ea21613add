//! # Stats Service
//!
//! `GET /api/stats`: the registry total for everyone, plus the caller's own
//! contribution counts and rank when the caller is signed in.

use actix_web::web::{get, scope, Data};
use actix_web::{HttpRequest, HttpResponse, Responder, Scope};
use common::requests::{ContributorRank, StatsResponse, UserStats};
use log::error;

use crate::services::auth::current_user;
use crate::store::{Database, StoreError};

const API_PATH: &str = "/api/stats";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

pub async fn process(db: Data<Database>, req: HttpRequest) -> impl Responder {
    let user = match current_user(&db, &req) {
        Ok(user) => user,
        Err(denied) => return denied.response(),
    };
    match collect_stats(&db, user.as_deref()) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            error!("Failed to collect stats: {}", e);
            HttpResponse::ServiceUnavailable().body("Error collecting stats")
        }
    }
}

pub fn collect_stats(db: &Database, user: Option<&str>) -> Result<StatsResponse, StoreError> {
    let total_approved = db.count_approved(None)?;
    let user = match user {
        Some(user) => {
            let is_admin = db.is_admin(user)?;
            let approved = db.count_approved(Some(user))?;
            let pending = db.count_pending(Some(user))?;
            Some(UserStats {
                is_admin,
                approved,
                pending,
                rank: ContributorRank::for_user(is_admin, approved, pending),
            })
        }
        None => None,
    };
    Ok(StatsResponse {
        total_approved,
        user,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::temp_db;
    use common::model::draft::ArchiveHolding;
    use common::model::record::RecordFields;

    #[test]
    fn anonymous_callers_only_get_the_total() {
        let (_dir, db) = temp_db();
        db.insert_approved(&RecordFields::default(), Some("u1")).unwrap();
        let stats = collect_stats(&db, None).unwrap();
        assert_eq!(stats.total_approved, 1);
        assert_eq!(stats.user, None);
    }

    #[test]
    fn ranks_follow_role_and_contributions() {
        let (_dir, db) = temp_db();
        db.seed_admins(&["admin".to_string()]).unwrap();
        db.insert_pending(&RecordFields::default(), ArchiveHolding::Ukrainian, Some("u1"))
            .unwrap();

        let rank = |user| collect_stats(&db, Some(user)).unwrap().user.unwrap().rank;
        assert_eq!(rank("admin"), ContributorRank::Keeper);
        assert_eq!(rank("u1"), ContributorRank::Detective);
        assert_eq!(rank("u2"), ContributorRank::Tourist);

        let u1 = collect_stats(&db, Some("u1")).unwrap().user.unwrap();
        assert_eq!((u1.approved, u1.pending), (0, 1));
    }
}
