use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::catalog::{Branch, BranchDto, CatalogDto, DocumentType, VehicleType},
    models::named::normalize,
};

/// Document type store. Deletion is refused while any employee or client
/// still references the type.
pub struct DocumentTypeStore {
    pool: DbPool,
}

impl DocumentTypeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<DocumentType>> {
        let types =
            sqlx::query_as::<_, DocumentType>("SELECT * FROM document_types ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(types)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<DocumentType> {
        let doc_type =
            sqlx::query_as::<_, DocumentType>("SELECT * FROM document_types WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(AppError::NotFound)?;

        Ok(doc_type)
    }

    pub async fn create(&self, dto: CatalogDto) -> Result<DocumentType> {
        let name = normalize(&dto.name);

        let mut tx = self.pool.begin().await?;
        check_unique_name(
            &mut tx,
            "document_types",
            &name,
            None,
            "a document type with this name already exists",
        )
        .await?;

        let result = sqlx::query("INSERT INTO document_types (name) VALUES (?)")
            .bind(&name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, dto: CatalogDto) -> Result<DocumentType> {
        let name = normalize(&dto.name);
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        check_unique_name(
            &mut tx,
            "document_types",
            &name,
            Some(id),
            "a document type with this name already exists",
        )
        .await?;

        sqlx::query("UPDATE document_types SET name = ? WHERE id = ?")
            .bind(&name)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get_by_id(id).await?;

        let references: i64 = sqlx::query_scalar(
            "SELECT (SELECT COUNT(*) FROM employees WHERE document_type_id = ?) \
                  + (SELECT COUNT(*) FROM clients WHERE document_type_id = ?)",
        )
        .bind(id)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        if references > 0 {
            return Err(AppError::Protected("document type"));
        }

        sqlx::query("DELETE FROM document_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| protected_on_fk(e, "document type"))?;

        Ok(())
    }
}

/// Vehicle type store, protected the same way as document types.
pub struct VehicleTypeStore {
    pool: DbPool,
}

impl VehicleTypeStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<VehicleType>> {
        let types =
            sqlx::query_as::<_, VehicleType>("SELECT * FROM vehicle_types ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(types)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<VehicleType> {
        let vehicle_type =
            sqlx::query_as::<_, VehicleType>("SELECT * FROM vehicle_types WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or(AppError::NotFound)?;

        Ok(vehicle_type)
    }

    pub async fn create(&self, dto: CatalogDto) -> Result<VehicleType> {
        let name = normalize(&dto.name);

        let mut tx = self.pool.begin().await?;
        check_unique_name(
            &mut tx,
            "vehicle_types",
            &name,
            None,
            "a vehicle type with this name already exists",
        )
        .await?;

        let result = sqlx::query("INSERT INTO vehicle_types (name) VALUES (?)")
            .bind(&name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, dto: CatalogDto) -> Result<VehicleType> {
        let name = normalize(&dto.name);
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        check_unique_name(
            &mut tx,
            "vehicle_types",
            &name,
            Some(id),
            "a vehicle type with this name already exists",
        )
        .await?;

        sqlx::query("UPDATE vehicle_types SET name = ? WHERE id = ?")
            .bind(&name)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.get_by_id(id).await?;

        let references: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM vehicles WHERE vehicle_type_id = ?")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if references > 0 {
            return Err(AppError::Protected("vehicle type"));
        }

        sqlx::query("DELETE FROM vehicle_types WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| protected_on_fk(e, "vehicle type"))?;

        Ok(())
    }
}

/// Branch store. Branch names share the global-uniqueness rule of the
/// catalog tables.
pub struct BranchStore {
    pool: DbPool,
}

impl BranchStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Branch>> {
        let branches = sqlx::query_as::<_, Branch>("SELECT * FROM branches ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(branches)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Branch> {
        let branch = sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(branch)
    }

    pub async fn create(&self, dto: BranchDto) -> Result<Branch> {
        let name = normalize(&dto.name);

        let mut tx = self.pool.begin().await?;
        check_unique_name(
            &mut tx,
            "branches",
            &name,
            None,
            "a branch with this name already exists",
        )
        .await?;

        let result = sqlx::query("INSERT INTO branches (name, address_id) VALUES (?, ?)")
            .bind(&name)
            .bind(dto.address_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, dto: BranchDto) -> Result<Branch> {
        let name = normalize(&dto.name);
        self.get_by_id(id).await?;

        let mut tx = self.pool.begin().await?;
        check_unique_name(
            &mut tx,
            "branches",
            &name,
            Some(id),
            "a branch with this name already exists",
        )
        .await?;

        sqlx::query("UPDATE branches SET name = ?, address_id = ? WHERE id = ?")
            .bind(&name)
            .bind(dto.address_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM branches WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Commit-time backstop for the protected catalog deletes: a RESTRICT
/// refusal that raced past the pre-check is still a protection error, not
/// a bad payload.
fn protected_on_fk(err: sqlx::Error, entity: &'static str) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_foreign_key_violation() {
            return AppError::Protected(entity);
        }
    }
    AppError::from(err)
}

/// Shared pre-save name check for the globally unique name tables.
async fn check_unique_name(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    table: &str,
    name: &str,
    exclude_id: Option<i64>,
    message: &str,
) -> Result<()> {
    let query = format!(
        "SELECT id FROM {table} WHERE name = ? AND id != COALESCE(?, -1)"
    );
    let existing = sqlx::query_scalar::<_, i64>(&query)
        .bind(name)
        .bind(exclude_id)
        .fetch_optional(&mut **tx)
        .await?;

    if existing.is_some() {
        return Err(AppError::validation("name", message.to_string()));
    }
    Ok(())
}
