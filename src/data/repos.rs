pub mod implementors;
pub mod traits;

use crate::data::database::Database;
use diesel::result;
use diesel_async::AsyncMysqlConnection;
use diesel_async::pooled_connection::deadpool::Object;

/// Checks out a pooled connection, folding pool failures into a diesel
/// error so repo signatures stay uniform.
pub(crate) async fn acquire() -> Result<Object<AsyncMysqlConnection>, result::Error> {
    let db = Database::new().await;
    db.get_connection().await.map_err(|e| {
        result::Error::DatabaseError(
            result::DatabaseErrorKind::UnableToSendCommand,
            Box::new(e.to_string()),
        )
    })
}
