//! Translation of `PostFilter` trees into SeaORM conditions.

use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ColumnTrait, Condition};

use quire_core::query::PostFilter;

use super::entity::post;

const LIKE_ESCAPE: char = '\\';

/// Build the WHERE condition for a post predicate.
///
/// An empty `And` renders as TRUE and an empty `Or` as FALSE, matching
/// in-memory evaluation.
pub(crate) fn post_condition(filter: &PostFilter) -> Condition {
    match filter {
        PostFilter::Published => Condition::all().add(post::Column::IsPublished.eq(true)),
        PostFilter::AuthorIs(author_id) => {
            Condition::all().add(post::Column::AuthorId.eq(*author_id))
        }
        PostFilter::IdIs(id) => Condition::all().add(post::Column::Id.eq(*id)),
        PostFilter::TitleContains(term) => Condition::all()
            .add(Expr::col((post::Entity, post::Column::Title)).ilike(contains_pattern(term))),
        PostFilter::ContentContains(term) => Condition::all()
            .add(Expr::col((post::Entity, post::Column::Content)).ilike(contains_pattern(term))),
        PostFilter::And(filters) => filters
            .iter()
            .fold(Condition::all(), |cond, f| cond.add(post_condition(f))),
        PostFilter::Or(filters) => filters
            .iter()
            .fold(Condition::any(), |cond, f| cond.add(post_condition(f))),
    }
}

/// `%term%` with LIKE wildcards in the term taken literally.
fn contains_pattern(term: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(term))).escape(LIKE_ESCAPE)
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
