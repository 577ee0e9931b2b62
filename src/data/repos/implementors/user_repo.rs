use crate::data::models::user::{NewUser, UpdateUser, User};
use crate::data::repos::acquire;
use crate::data::repos::traits::repository::Repository;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

pub struct UserRepo {}

impl UserRepo {
    pub fn new() -> Self {
        UserRepo {}
    }

    pub async fn get_by_username(
        &self,
        username_query: &str,
    ) -> Result<Option<User>, result::Error> {
        use crate::data::models::schema::users::dsl::{username, users};

        let mut conn = acquire().await?;

        match users
            .filter(username.eq(username_query))
            .first::<User>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Login lookup: the identifier may be a username or an email address.
    pub async fn get_by_login(&self, login: &str) -> Result<Option<User>, result::Error> {
        use crate::data::models::schema::users::dsl::{email, username, users};

        let mut conn = acquire().await?;

        match users
            .filter(username.eq(login).or(email.eq(login)))
            .first::<User>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Checks whether another account already claimed a username or email.
    /// `exclude` skips the caller's own row on profile updates.
    pub async fn credentials_taken(
        &self,
        username_query: &str,
        email_query: &str,
        exclude: Option<i32>,
    ) -> Result<bool, result::Error> {
        use crate::data::models::schema::users::dsl::{email, user_id, username, users};

        let mut conn = acquire().await?;

        let count: i64 = match exclude {
            Some(id) => {
                users
                    .filter(username.eq(username_query).or(email.eq(email_query)))
                    .filter(user_id.ne(id))
                    .count()
                    .get_result(&mut conn)
                    .await?
            }
            None => {
                users
                    .filter(username.eq(username_query).or(email.eq(email_query)))
                    .count()
                    .get_result(&mut conn)
                    .await?
            }
        };
        Ok(count > 0)
    }

    /// Email-uniqueness probe for profile edits, skipping the caller's row.
    pub async fn email_taken(
        &self,
        email_query: &str,
        exclude: i32,
    ) -> Result<bool, result::Error> {
        use crate::data::models::schema::users::dsl::{email, user_id, users};

        let mut conn = acquire().await?;

        let count: i64 = users
            .filter(email.eq(email_query))
            .filter(user_id.ne(exclude))
            .count()
            .get_result(&mut conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn touch_last_login(&self, id: i32) -> Result<(), result::Error> {
        use crate::data::models::schema::users::dsl::{last_login, user_id, users};

        let mut conn = acquire().await?;

        diesel::update(users.filter(user_id.eq(id)))
            .set(last_login.eq(diesel::dsl::now))
            .execute(&mut conn)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Repository for UserRepo {
    type Id = i32;
    type Item = User;
    type NewItem<'a> = NewUser<'a>;
    type UpdateForm<'a> = UpdateUser<'a>;

    async fn get_all(&self) -> Result<Option<Vec<Self::Item>>, result::Error> {
        use crate::data::models::schema::users::dsl::users;

        let mut conn = acquire().await?;

        match users.load::<Self::Item>(&mut conn).await {
            Ok(value) if value.is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_by_id(&self, id: Self::Id) -> Result<Option<Self::Item>, result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let mut conn = acquire().await?;

        match users
            .filter(user_id.eq(id))
            .first::<Self::Item>(&mut conn)
            .await
        {
            Ok(value) => Ok(Some(value)),
            Err(result::Error::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn add<'a>(&self, item: Self::NewItem<'a>) -> Result<(), result::Error> {
        use crate::data::models::schema::users::dsl::users;

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::insert_into(users)
                    .values(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn update<'a>(
        &self,
        id: Self::Id,
        item: Self::UpdateForm<'a>,
    ) -> Result<(), result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::update(users.filter(user_id.eq(id)))
                    .set(&item)
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, id: Self::Id) -> Result<(), result::Error> {
        use crate::data::models::schema::users::dsl::{user_id, users};

        let mut conn = acquire().await?;

        conn.transaction(|connection| {
            async move {
                diesel::delete(users.filter(user_id.eq(id)))
                    .execute(connection)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }
}

impl Default for UserRepo {
    fn default() -> Self {
        Self::new()
    }
}
