use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        admin::AuditLogList,
        auth::{CreateStaffRequest, LoginRequest, LoginResponse, RegisterRequest},
        customers::{
            CreateCustomerRequest, CustomerCareReport, CustomerList, CustomerProfile,
            PaymentHistory, UpdateCustomerRequest,
        },
        dashboard::{AdminDashboard, CustomerDashboard, Dashboard, DealerDashboard, EvmDashboard},
        dealers::{
            CreateDealerContractRequest, CreateDealerRequest, DealerContractList, DealerList,
            DealerSales, UpdateDealerContractRequest, UpdateDealerRequest,
        },
        feedbacks::{CreateFeedbackRequest, FeedbackList},
        sales::{
            CreateOrderRequest, CreateQuotationRequest, CreateSalesContractRequest, OrderBalance,
            OrderList, PaymentList, PaymentReceipt, PaymentRequest, QuotationAccepted,
            QuotationList, RejectOrderRequest, SignedContract,
        },
        test_drives::{Availability, DaySchedule, ScheduleTestDriveRequest, TestDriveList},
        vehicles::{
            CreateManufacturerRequest, CreateVariantRequest, CreateVehicleModelRequest,
            ManufacturerList, ManufacturerSummary, UpdateManufacturerRequest,
            UpdateVariantRequest, UpdateVehicleModelRequest, VariantDetail, VariantList,
            VehicleModelDetail, VehicleModelList,
        },
    },
    entity::{
        orders::OrderStatus, quotations::QuotationStatus, test_drives::TestDriveStatus,
        users::Role,
    },
    models::{
        AuditLog, Customer, Dealer, DealerContract, Feedback, Manufacturer, Order, Payment,
        Quotation, SalesContract, TestDrive, User, VehicleModel, VehicleVariant,
    },
    response::{ApiResponse, Meta},
    routes::{
        admin, auth, catalog, customers, dashboard, dealers, feedbacks, health, orders,
        quotations, test_drives,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::me,
        auth::create_staff,
        catalog::list_manufacturers,
        catalog::get_manufacturer,
        catalog::create_manufacturer,
        catalog::update_manufacturer,
        catalog::delete_manufacturer,
        catalog::list_vehicle_models,
        catalog::get_vehicle_model,
        catalog::create_vehicle_model,
        catalog::update_vehicle_model,
        catalog::delete_vehicle_model,
        catalog::list_variants,
        catalog::get_variant,
        catalog::create_variant,
        catalog::update_variant,
        catalog::delete_variant,
        dealers::list_dealers,
        dealers::get_dealer,
        dealers::create_dealer,
        dealers::update_dealer,
        dealers::delete_dealer,
        dealers::list_dealer_contracts,
        dealers::create_dealer_contract,
        dealers::dealer_sales,
        dealers::get_dealer_contract,
        dealers::update_dealer_contract,
        customers::list_customers,
        customers::create_customer,
        customers::get_customer_by_email,
        customers::get_customer,
        customers::update_customer,
        customers::customer_profile,
        customers::customer_payments,
        customers::customer_care_report,
        orders::list_orders,
        orders::create_order,
        orders::pending_orders,
        orders::get_order,
        orders::confirm_order,
        orders::reject_order,
        orders::list_payments,
        orders::pay_order,
        orders::order_balance,
        orders::get_contract,
        orders::sign_contract,
        orders::complete_order,
        quotations::list_quotations,
        quotations::create_quotation,
        quotations::get_quotation,
        quotations::approve_quotation,
        quotations::reject_quotation,
        quotations::accept_quotation,
        test_drives::list_test_drives,
        test_drives::schedule_test_drive,
        test_drives::check_availability,
        test_drives::day_schedule,
        test_drives::get_test_drive,
        test_drives::confirm_test_drive,
        test_drives::complete_test_drive,
        test_drives::cancel_test_drive,
        feedbacks::list_feedbacks,
        feedbacks::create_feedback,
        dashboard::dashboard,
        admin::list_audit_logs
    ),
    components(
        schemas(
            Role,
            OrderStatus,
            QuotationStatus,
            TestDriveStatus,
            User,
            Dealer,
            DealerContract,
            Manufacturer,
            VehicleModel,
            VehicleVariant,
            Customer,
            Quotation,
            Order,
            Payment,
            SalesContract,
            TestDrive,
            Feedback,
            AuditLog,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            CreateStaffRequest,
            CreateManufacturerRequest,
            UpdateManufacturerRequest,
            ManufacturerSummary,
            ManufacturerList,
            CreateVehicleModelRequest,
            UpdateVehicleModelRequest,
            VehicleModelDetail,
            VehicleModelList,
            CreateVariantRequest,
            UpdateVariantRequest,
            VariantDetail,
            VariantList,
            CreateDealerRequest,
            UpdateDealerRequest,
            DealerList,
            CreateDealerContractRequest,
            UpdateDealerContractRequest,
            DealerContractList,
            DealerSales,
            CreateCustomerRequest,
            UpdateCustomerRequest,
            CustomerList,
            CustomerProfile,
            PaymentHistory,
            CustomerCareReport,
            CreateOrderRequest,
            RejectOrderRequest,
            OrderList,
            PaymentRequest,
            PaymentReceipt,
            PaymentList,
            OrderBalance,
            CreateSalesContractRequest,
            SignedContract,
            CreateQuotationRequest,
            QuotationList,
            QuotationAccepted,
            ScheduleTestDriveRequest,
            Availability,
            TestDriveList,
            DaySchedule,
            CreateFeedbackRequest,
            FeedbackList,
            AdminDashboard,
            EvmDashboard,
            DealerDashboard,
            CustomerDashboard,
            Dashboard,
            AuditLogList,
            health::HealthData,
            Meta,
            ApiResponse<Order>,
            ApiResponse<OrderList>,
            ApiResponse<TestDrive>,
            ApiResponse<Dashboard>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Registration, login and staff accounts"),
        (name = "Catalog", description = "Manufacturers, vehicle models and variants"),
        (name = "Dealers", description = "Dealers, dealer contracts and sales totals"),
        (name = "Customers", description = "Customer records and profiles"),
        (name = "Orders", description = "Orders, payments and sales contracts"),
        (name = "Quotations", description = "Price quotations"),
        (name = "Test drives", description = "Test drive booking"),
        (name = "Feedback", description = "Customer feedback"),
        (name = "Reports", description = "Customer care reporting"),
        (name = "Dashboard", description = "Role-specific summaries"),
        (name = "Admin", description = "Admin endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
