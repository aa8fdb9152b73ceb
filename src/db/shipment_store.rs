use crate::{
    db::DbPool,
    error::{AppError, Result},
    models::shipment::{Package, PackageDto, Shipment, ShipmentDto},
};

/// Shipment store
pub struct ShipmentStore {
    pool: DbPool,
}

impl ShipmentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Shipment>> {
        let shipments =
            sqlx::query_as::<_, Shipment>("SELECT * FROM shipments ORDER BY shipped_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(shipments)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Shipment> {
        let shipment = sqlx::query_as::<_, Shipment>("SELECT * FROM shipments WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(shipment)
    }

    pub async fn create(&self, dto: ShipmentDto) -> Result<Shipment> {
        let result = sqlx::query(
            r#"
            INSERT INTO shipments (shipped_at, branch_id, client_id, vehicle_plate, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(dto.shipped_at)
        .bind(dto.branch_id)
        .bind(dto.client_id)
        .bind(&dto.vehicle_plate)
        .bind(dto.status)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, dto: ShipmentDto) -> Result<Shipment> {
        self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE shipments
            SET shipped_at = ?, branch_id = ?, client_id = ?, vehicle_plate = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(dto.shipped_at)
        .bind(dto.branch_id)
        .bind(dto.client_id)
        .bind(&dto.vehicle_plate)
        .bind(dto.status)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM shipments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Package store
pub struct PackageStore {
    pool: DbPool,
}

impl PackageStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Package>> {
        let packages = sqlx::query_as::<_, Package>("SELECT * FROM packages ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(packages)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Package> {
        let package = sqlx::query_as::<_, Package>("SELECT * FROM packages WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(package)
    }

    pub async fn create(&self, dto: PackageDto) -> Result<Package> {
        check_dimensions(&dto)?;

        let result = sqlx::query(
            r#"
            INSERT INTO packages (weight, width, height, length, description, shipment_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(dto.weight)
        .bind(dto.width)
        .bind(dto.height)
        .bind(dto.length)
        .bind(&dto.description)
        .bind(dto.shipment_id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(result.last_insert_rowid()).await
    }

    pub async fn update(&self, id: i64, dto: PackageDto) -> Result<Package> {
        check_dimensions(&dto)?;
        self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE packages
            SET weight = ?, width = ?, height = ?, length = ?, description = ?, shipment_id = ?
            WHERE id = ?
            "#,
        )
        .bind(dto.weight)
        .bind(dto.width)
        .bind(dto.height)
        .bind(dto.length)
        .bind(&dto.description)
        .bind(dto.shipment_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM packages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

fn check_dimensions(dto: &PackageDto) -> Result<()> {
    if dto.weight < 0.0 {
        return Err(AppError::validation("weight", "weight cannot be negative"));
    }
    for (field, value) in [
        ("width", dto.width),
        ("height", dto.height),
        ("length", dto.length),
    ] {
        if value < 0.0 {
            return Err(AppError::validation(field, "dimension cannot be negative"));
        }
    }
    Ok(())
}
